//! Standard amino acids keyed by one-letter code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AminoAcid {
    pub code: char,
    pub short_name: &'static str,
    pub full_name: &'static str,
}

const AMINO_ACIDS: &[AminoAcid] = &[
    AminoAcid { code: 'A', short_name: "ala", full_name: "alanine" },
    AminoAcid { code: 'R', short_name: "arg", full_name: "arginine" },
    AminoAcid { code: 'N', short_name: "asn", full_name: "asparagine" },
    AminoAcid { code: 'D', short_name: "asp", full_name: "aspartic acid" },
    AminoAcid { code: 'C', short_name: "cys", full_name: "cysteine" },
    AminoAcid { code: 'E', short_name: "glu", full_name: "glutamic acid" },
    AminoAcid { code: 'Q', short_name: "gln", full_name: "glutamine" },
    AminoAcid { code: 'G', short_name: "gly", full_name: "glycine" },
    AminoAcid { code: 'H', short_name: "his", full_name: "histidine" },
    AminoAcid { code: 'I', short_name: "ile", full_name: "isoleucine" },
    AminoAcid { code: 'L', short_name: "leu", full_name: "leucine" },
    AminoAcid { code: 'K', short_name: "lys", full_name: "lysine" },
    AminoAcid { code: 'M', short_name: "met", full_name: "methionine" },
    AminoAcid { code: 'F', short_name: "phe", full_name: "phenylalanine" },
    AminoAcid { code: 'P', short_name: "pro", full_name: "proline" },
    AminoAcid { code: 'S', short_name: "ser", full_name: "serine" },
    AminoAcid { code: 'T', short_name: "thr", full_name: "threonine" },
    AminoAcid { code: 'W', short_name: "trp", full_name: "tryptophan" },
    AminoAcid { code: 'Y', short_name: "tyr", full_name: "tyrosine" },
    AminoAcid { code: 'V', short_name: "val", full_name: "valine" },
    AminoAcid { code: 'U', short_name: "sec", full_name: "selenocysteine" },
    AminoAcid { code: 'O', short_name: "pyl", full_name: "pyrrolysine" },
];

/// Case-insensitive lookup by one-letter code.
pub fn lookup(code: &str) -> Option<&'static AminoAcid> {
    let mut chars = code.trim().chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    AMINO_ACIDS.iter().find(|aa| aa.code == c)
}
