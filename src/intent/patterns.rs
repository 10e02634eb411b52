use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Auxiliary-verb question: "does ... ?", "will ... ?".
    pub static ref YES_NO_QUESTION: Regex =
        Regex::new(r"\b(does|do|is|are|will|would|can|could|should|has|have|had)\b.*\?").unwrap();

    pub static ref STANCE_VERB: Regex =
        Regex::new(r"\b(support|oppose|favor|against|back|endorse)\b").unwrap();

    /// "oppose privatizing ..." or "privatizing ..., do you oppose it".
    pub static ref OPPOSES_PRIVATIZATION: Regex =
        Regex::new(r"\b(oppos\w*|against)\b.*privati[sz]|privati[sz].*\b(oppos\w*|against)\b").unwrap();

    pub static ref OVERTURN: Regex =
        Regex::new(r"\b(overturn\w*|ban|banning|end|ending|against|oppos\w*)\b").unwrap();

    pub static ref SUPPORTS_CITIZENS_UNITED: Regex =
        Regex::new(r"\b(support|favor|back|endorse)\w*\b.*citizens.?united").unwrap();
}

/// Yes/no-seeking: an auxiliary-verb question or any explicit stance verb.
pub fn is_yes_no(text: &str) -> bool {
    YES_NO_QUESTION.is_match(text) || STANCE_VERB.is_match(text)
}
