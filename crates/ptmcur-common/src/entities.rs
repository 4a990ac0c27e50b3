/// Core statement types read from the INDRA statement corpus.
/// Only the fields the curation jobs look at are modelled; the rest of the
/// INDRA JSON is ignored on read.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PtmcurError;

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    #[serde(default)]
    pub db_refs: BTreeMap<String, serde_json::Value>,
}

impl Agent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), db_refs: BTreeMap::new() }
    }

    /// Builder-style helper used by loaders and tests.
    pub fn with_ref(mut self, namespace: &str, id: &str) -> Self {
        self.db_refs.insert(namespace.to_string(), serde_json::Value::String(id.to_string()));
        self
    }

    /// Look up a grounding, e.g. `db_ref("UP")` → `Some("P31749")`.
    pub fn db_ref(&self, namespace: &str) -> Option<&str> {
        self.db_refs.get(namespace).and_then(|v| v.as_str())
    }

    pub fn has_ref(&self, namespace: &str) -> bool {
        self.db_refs.contains_key(namespace)
    }
}

// ---------------------------------------------------------------------------
// Evidence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_api: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "de_opt_hash", skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<i64>,
}

// ---------------------------------------------------------------------------
// Modification types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModType {
    Phosphorylation,
    Dephosphorylation,
    Ubiquitination,
    Deubiquitination,
    Acetylation,
    Deacetylation,
    Methylation,
    Demethylation,
    Sumoylation,
    Desumoylation,
    Hydroxylation,
    Dehydroxylation,
    Glycosylation,
    Deglycosylation,
    Farnesylation,
    Defarnesylation,
    Palmitoylation,
    Depalmitoylation,
    Myristoylation,
    Demyristoylation,
    Geranylgeranylation,
    Degeranylgeranylation,
    Ribosylation,
    Deribosylation,
}

/// (variant, INDRA class name, lower-case mod key)
const MOD_TYPES: &[(ModType, &str, &str)] = &[
    (ModType::Phosphorylation,       "Phosphorylation",       "phosphorylation"),
    (ModType::Dephosphorylation,     "Dephosphorylation",     "dephosphorylation"),
    (ModType::Ubiquitination,        "Ubiquitination",        "ubiquitination"),
    (ModType::Deubiquitination,      "Deubiquitination",      "deubiquitination"),
    (ModType::Acetylation,           "Acetylation",           "acetylation"),
    (ModType::Deacetylation,         "Deacetylation",         "deacetylation"),
    (ModType::Methylation,           "Methylation",           "methylation"),
    (ModType::Demethylation,         "Demethylation",         "demethylation"),
    (ModType::Sumoylation,           "Sumoylation",           "sumoylation"),
    (ModType::Desumoylation,         "Desumoylation",         "desumoylation"),
    (ModType::Hydroxylation,         "Hydroxylation",         "hydroxylation"),
    (ModType::Dehydroxylation,       "Dehydroxylation",       "dehydroxylation"),
    (ModType::Glycosylation,         "Glycosylation",         "glycosylation"),
    (ModType::Deglycosylation,       "Deglycosylation",       "deglycosylation"),
    (ModType::Farnesylation,         "Farnesylation",         "farnesylation"),
    (ModType::Defarnesylation,       "Defarnesylation",       "defarnesylation"),
    (ModType::Palmitoylation,        "Palmitoylation",        "palmitoylation"),
    (ModType::Depalmitoylation,      "Depalmitoylation",      "depalmitoylation"),
    (ModType::Myristoylation,        "Myristoylation",        "myristoylation"),
    (ModType::Demyristoylation,      "Demyristoylation",      "demyristoylation"),
    (ModType::Geranylgeranylation,   "Geranylgeranylation",   "geranylgeranylation"),
    (ModType::Degeranylgeranylation, "Degeranylgeranylation", "degeranylgeranylation"),
    (ModType::Ribosylation,          "Ribosylation",          "ribosylation"),
    (ModType::Deribosylation,        "Deribosylation",        "deribosylation"),
];

impl ModType {
    /// Lower-case key used in configuration and as the exported MECHANISM.
    pub fn mod_key(&self) -> &'static str {
        MOD_TYPES.iter().find(|(m, _, _)| m == self).map(|(_, _, k)| *k).unwrap_or("")
    }

    /// INDRA statement class name.
    pub fn class_name(&self) -> &'static str {
        MOD_TYPES.iter().find(|(m, _, _)| m == self).map(|(_, c, _)| *c).unwrap_or("")
    }

    pub fn from_mod_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        MOD_TYPES.iter().find(|(_, _, k)| *k == key).map(|(m, _, _)| *m)
    }

    pub fn from_class_name(name: &str) -> Option<Self> {
        MOD_TYPES.iter().find(|(_, c, _)| *c == name).map(|(m, _, _)| *m)
    }
}

impl fmt::Display for ModType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mod_key())
    }
}

// ---------------------------------------------------------------------------
// Statement kind
// ---------------------------------------------------------------------------

/// Which regulation statements a run pairs with its modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulationFamily {
    /// Activation / Inhibition
    Activity,
    /// IncreaseAmount / DecreaseAmount
    Amount,
}

impl RegulationFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegulationFamily::Activity => "activity",
            RegulationFamily::Amount   => "amount",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "activity" => Some(RegulationFamily::Activity),
            "amount"   => Some(RegulationFamily::Amount),
            _          => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Modification(ModType),
    Activation,
    Inhibition,
    IncreaseAmount,
    DecreaseAmount,
}

impl StatementKind {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Activation"     => Some(StatementKind::Activation),
            "Inhibition"     => Some(StatementKind::Inhibition),
            "IncreaseAmount" => Some(StatementKind::IncreaseAmount),
            "DecreaseAmount" => Some(StatementKind::DecreaseAmount),
            other            => ModType::from_class_name(other).map(StatementKind::Modification),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            StatementKind::Modification(m) => m.class_name(),
            StatementKind::Activation      => "Activation",
            StatementKind::Inhibition      => "Inhibition",
            StatementKind::IncreaseAmount  => "IncreaseAmount",
            StatementKind::DecreaseAmount  => "DecreaseAmount",
        }
    }

    pub fn mod_type(&self) -> Option<ModType> {
        match self {
            StatementKind::Modification(m) => Some(*m),
            _ => None,
        }
    }

    pub fn regulation_family(&self) -> Option<RegulationFamily> {
        match self {
            StatementKind::Modification(_) => None,
            StatementKind::Activation | StatementKind::Inhibition => Some(RegulationFamily::Activity),
            StatementKind::IncreaseAmount | StatementKind::DecreaseAmount => Some(RegulationFamily::Amount),
        }
    }

    /// Default EFFECT wording for a regulation kind.
    pub fn default_effect(&self) -> Option<&'static str> {
        match self {
            StatementKind::Modification(_) => None,
            StatementKind::Activation      => Some("up-regulates"),
            StatementKind::IncreaseAmount  => Some("up-regulates quantity"),
            StatementKind::Inhibition      => Some("down-regulates"),
            StatementKind::DecreaseAmount  => Some("down-regulates quantity"),
        }
    }
}

// ---------------------------------------------------------------------------
// Statement
// ---------------------------------------------------------------------------

/// A modification (controller = enzyme, target = substrate) or a regulation
/// (controller = subject, target = object).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStatement", into = "RawStatement")]
pub struct Statement {
    pub kind: StatementKind,
    pub controller: Option<Agent>,
    pub target: Agent,
    pub residue: Option<String>,
    pub position: Option<String>,
    /// Content hash; 0 until assigned by the corpus loader when the JSON has none.
    pub hash: i64,
    pub evidence: Vec<Evidence>,
}

impl Statement {
    pub fn new(kind: StatementKind, controller: Option<Agent>, target: Agent) -> Self {
        Self {
            kind,
            controller,
            target,
            residue: None,
            position: None,
            hash: 0,
            evidence: Vec::new(),
        }
    }

    pub fn is_modification(&self) -> bool {
        matches!(self.kind, StatementKind::Modification(_))
    }

    pub fn controller_name(&self) -> &str {
        self.controller.as_ref().map(|a| a.name.as_str()).unwrap_or("")
    }

    /// (controller name, target name)
    pub fn pair(&self) -> (String, String) {
        (self.controller_name().to_string(), self.target.name.clone())
    }
}

/// Wire form of an INDRA statement.
#[derive(Debug, Serialize, Deserialize)]
struct RawStatement {
    #[serde(rename = "type")]
    stmt_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enz: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subj: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    obj: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    residue: Option<String>,
    #[serde(default, deserialize_with = "de_opt_position", skip_serializing_if = "Option::is_none")]
    position: Option<String>,
    #[serde(default)]
    evidence: Vec<Evidence>,
    #[serde(default, deserialize_with = "de_opt_hash", skip_serializing_if = "Option::is_none")]
    matches_hash: Option<i64>,
}

impl TryFrom<RawStatement> for Statement {
    type Error = PtmcurError;

    fn try_from(raw: RawStatement) -> Result<Self, Self::Error> {
        let kind = StatementKind::from_type_name(&raw.stmt_type)
            .ok_or_else(|| PtmcurError::UnsupportedStatement(raw.stmt_type.clone()))?;

        let (controller, target, role) = if kind.mod_type().is_some() {
            (raw.enz, raw.sub, "substrate")
        } else {
            (raw.subj, raw.obj, "object")
        };
        let target = target.ok_or(PtmcurError::MissingAgent {
            stmt_type: raw.stmt_type.clone(),
            role,
        })?;

        Ok(Statement {
            kind,
            controller,
            target,
            residue: raw.residue,
            position: raw.position,
            hash: raw.matches_hash.unwrap_or(0),
            evidence: raw.evidence,
        })
    }
}

impl From<Statement> for RawStatement {
    fn from(stmt: Statement) -> Self {
        let is_mod = stmt.is_modification();
        let (enz, sub, subj, obj) = if is_mod {
            (stmt.controller, Some(stmt.target), None, None)
        } else {
            (None, None, stmt.controller, Some(stmt.target))
        };
        RawStatement {
            stmt_type: stmt.kind.type_name().to_string(),
            enz,
            sub,
            subj,
            obj,
            residue: stmt.residue,
            position: stmt.position,
            evidence: stmt.evidence,
            matches_hash: Some(stmt.hash),
        }
    }
}

// ---------------------------------------------------------------------------
// Curation
// ---------------------------------------------------------------------------

/// A curator's judgment on one (statement, evidence) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curation {
    #[serde(deserialize_with = "de_hash")]
    pub pa_hash: i64,
    #[serde(deserialize_with = "de_hash")]
    pub source_hash: i64,
    pub tag: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub curator: Option<String>,
}

impl Curation {
    pub fn is_correct(&self) -> bool {
        self.tag == "correct"
    }
}

// ---------------------------------------------------------------------------
// Hash helpers: the corpus writes hashes both as JSON numbers and strings.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum HashRepr {
    Int(i64),
    Str(String),
}

impl HashRepr {
    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            HashRepr::Int(v) => Ok(v),
            HashRepr::Str(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

fn de_hash<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    HashRepr::deserialize(de)?.into_i64()
}

fn de_opt_hash<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    Option::<HashRepr>::deserialize(de)?.map(HashRepr::into_i64).transpose()
}

fn de_opt_position<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<serde_json::Value>::deserialize(de)?.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}
