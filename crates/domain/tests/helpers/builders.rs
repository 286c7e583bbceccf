#![allow(dead_code)]

/// Builds raw wire-format DNS queries for tests.
pub struct WireQueryBuilder {
    id: u16,
    questions: Vec<(String, u16)>,
    answers: Vec<Vec<u8>>,
    additionals: Vec<Vec<u8>>,
}

impl WireQueryBuilder {
    pub fn new() -> Self {
        Self {
            id: 0x1234,
            questions: Vec::new(),
            answers: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn question(mut self, domain: &str, qtype: u16) -> Self {
        self.questions.push((domain.to_string(), qtype));
        self
    }

    /// An A record answer whose owner name is a pointer to the first question.
    pub fn answer_a(mut self, ip: [u8; 4]) -> Self {
        let mut rr = vec![0xC0, 0x0C];
        rr.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        rr.extend_from_slice(&300u32.to_be_bytes());
        rr.extend_from_slice(&[0x00, 0x04]);
        rr.extend_from_slice(&ip);
        self.answers.push(rr);
        self
    }

    /// An OPT record whose RDATA is the concatenation of `options`.
    pub fn opt(mut self, options: &[Vec<u8>]) -> Self {
        let rdata: Vec<u8> = options.concat();
        let mut rr = vec![0x00];
        rr.extend_from_slice(&41u16.to_be_bytes());
        rr.extend_from_slice(&1232u16.to_be_bytes());
        rr.extend_from_slice(&[0, 0, 0, 0]);
        rr.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        rr.extend_from_slice(&rdata);
        self.additionals.push(rr);
        self
    }

    /// A non-OPT additional record (TXT in the root zone).
    pub fn additional_txt(mut self, text: &[u8]) -> Self {
        let mut rr = vec![0x00];
        rr.extend_from_slice(&16u16.to_be_bytes());
        rr.extend_from_slice(&1u16.to_be_bytes());
        rr.extend_from_slice(&60u32.to_be_bytes());
        rr.extend_from_slice(&((text.len() + 1) as u16).to_be_bytes());
        rr.push(text.len() as u8);
        rr.extend_from_slice(text);
        self.additionals.push(rr);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&[0x01, 0x00]);
        buf.extend_from_slice(&(self.questions.len() as u16).to_be_bytes());
        buf.extend_from_slice(&(self.answers.len() as u16).to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&(self.additionals.len() as u16).to_be_bytes());
        for (domain, qtype) in &self.questions {
            for label in domain.split('.').filter(|l| !l.is_empty()) {
                buf.push(label.len() as u8);
                buf.extend_from_slice(label.as_bytes());
            }
            buf.push(0x00);
            buf.extend_from_slice(&qtype.to_be_bytes());
            buf.extend_from_slice(&[0x00, 0x01]);
        }
        for rr in &self.answers {
            buf.extend_from_slice(rr);
        }
        for rr in &self.additionals {
            buf.extend_from_slice(rr);
        }
        buf
    }
}

/// An ECS option TLV with an arbitrary family/prefix/address.
pub fn ecs_option(family: u16, source_prefix: u8, address: &[u8]) -> Vec<u8> {
    let mut opt = Vec::new();
    opt.extend_from_slice(&8u16.to_be_bytes());
    opt.extend_from_slice(&((4 + address.len()) as u16).to_be_bytes());
    opt.extend_from_slice(&family.to_be_bytes());
    opt.push(source_prefix);
    opt.push(0);
    opt.extend_from_slice(address);
    opt
}

/// An EDNS cookie option (code 10) used as filler.
pub fn cookie_option() -> Vec<u8> {
    let mut opt = Vec::new();
    opt.extend_from_slice(&10u16.to_be_bytes());
    opt.extend_from_slice(&8u16.to_be_bytes());
    opt.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
    opt
}
