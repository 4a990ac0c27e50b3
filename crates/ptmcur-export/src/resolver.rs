//! Modification/regulation resolution for a pair-group.
//!
//! A group can only produce rows when it holds at least one modification of
//! the run's type and at least one regulation. When one side is missing the
//! curator comment on the other side may say what it should have been:
//! an `EFFECT` on a modification implies a regulation, a `MECHANISM` on a
//! regulation implies a modification. Inferred statements are placeholders
//! with no curation and an empty comment.

use std::rc::Rc;

use ptmcur_common::{Agent, Evidence, PtmcurError, Result, Statement, StatementKind};
use tracing::{debug, info};

use crate::comment::{CommentField, ParsedComment};
use crate::grouping::{CuratedTuple, PairKey};
use crate::scope::ExportScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    HasBoth,
    HasModOnly,
    HasRegOnly,
    HasNeither,
}

impl GroupState {
    fn of(has_mod: bool, has_reg: bool) -> Self {
        match (has_mod, has_reg) {
            (true, true)   => GroupState::HasBoth,
            (true, false)  => GroupState::HasModOnly,
            (false, true)  => GroupState::HasRegOnly,
            (false, false) => GroupState::HasNeither,
        }
    }
}

/// A group with both sides present, ready for row synthesis.
#[derive(Debug, Clone)]
pub struct ResolvedGroup {
    pub key: PairKey,
    pub modifications: Vec<CuratedTuple>,
    pub regulations: Vec<CuratedTuple>,
}

/// Resolve one pair-group. `Ok(None)` means the group yields no rows;
/// an error is only returned for a comment declaring several effects.
pub fn resolve(key: &PairKey, tuples: &[CuratedTuple], scope: &ExportScope) -> Result<Option<ResolvedGroup>> {
    let mut modifications = Vec::new();
    let mut regulations = Vec::new();
    for tuple in tuples {
        if scope.is_modification(&tuple.statement) {
            modifications.push(tuple.clone());
        } else if scope.is_regulation(&tuple.statement) {
            regulations.push(tuple.clone());
        } else {
            debug!(%key, stmt_type = tuple.statement.kind.type_name(), "Statement outside export scope ignored");
        }
    }

    match GroupState::of(!modifications.is_empty(), !regulations.is_empty()) {
        GroupState::HasBoth => {}
        GroupState::HasModOnly => {
            for tuple in modifications.iter_mut() {
                let Some(kind) = regulation_from_comment(key, &tuple.comment)? else {
                    info!(%key, "No regulation could be inferred from the modification comment");
                    continue;
                };
                tuple.comment.remove(CommentField::Effect);
                regulations.push(placeholder_tuple(
                    Statement::new(kind, Some(Agent::default()), Agent::default()),
                    key,
                ));
            }
        }
        GroupState::HasRegOnly => {
            for tuple in regulations.iter_mut() {
                if !mechanism_matches(&tuple.comment, scope) {
                    info!(%key, "No modification could be inferred from the regulation comment");
                    continue;
                }
                tuple.comment.remove(CommentField::Mechanism);
                let stmt = Statement::new(
                    StatementKind::Modification(scope.mod_type),
                    tuple.statement.controller.clone(),
                    tuple.statement.target.clone(),
                );
                modifications.push(placeholder_tuple(stmt, key));
            }
        }
        GroupState::HasNeither => {
            info!(%key, "Group has neither a modification nor a regulation");
            return Ok(None);
        }
    }

    if modifications.is_empty() || regulations.is_empty() {
        return Ok(None);
    }

    Ok(Some(ResolvedGroup {
        key: key.clone(),
        modifications,
        regulations,
    }))
}

/// Classify an effect phrase into the regulation it implies.
pub fn regulation_from_effect(effect: &str) -> Option<StatementKind> {
    let effect = effect.trim().to_lowercase();
    if effect.contains("down-regulates") {
        if effect.starts_with("down-regulates quantity") {
            Some(StatementKind::DecreaseAmount)
        } else {
            Some(StatementKind::Inhibition)
        }
    } else if effect.contains("up-regulates") {
        if effect.starts_with("up-regulates quantity") {
            Some(StatementKind::IncreaseAmount)
        } else {
            Some(StatementKind::Activation)
        }
    } else {
        None
    }
}

/// The single effect a comment declares, if any.
pub(crate) fn single_effect<'a>(key: &PairKey, comment: &'a ParsedComment) -> Result<Option<&'a str>> {
    match comment.get(CommentField::Effect) {
        [] => Ok(None),
        [effect] => Ok(Some(effect.as_str())),
        effects => Err(PtmcurError::MultipleEffects {
            context: key.to_string(),
            effects: effects.to_vec(),
        }),
    }
}

fn regulation_from_comment(key: &PairKey, comment: &ParsedComment) -> Result<Option<StatementKind>> {
    Ok(single_effect(key, comment)?.and_then(regulation_from_effect))
}

fn mechanism_matches(comment: &ParsedComment, scope: &ExportScope) -> bool {
    match comment.get(CommentField::Mechanism) {
        [mechanism] => mechanism.trim().eq_ignore_ascii_case(scope.mechanism()),
        _ => false,
    }
}

fn placeholder_tuple(statement: Statement, key: &PairKey) -> CuratedTuple {
    let pmid = (!key.pmid.is_empty()).then(|| key.pmid.clone());
    CuratedTuple {
        statement: Rc::new(statement),
        evidence: Evidence { pmid, ..Default::default() },
        curation: None,
        comment: ParsedComment::default(),
    }
}
