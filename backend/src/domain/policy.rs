//! Authorization policy.
//!
//! Pure, side-effect-free decision functions consulted before every
//! mutation. Each decision point is an ordered rule list evaluated over an
//! explicit `(actor, action, target facts)` triple; the first rule with an
//! opinion wins and an empty outcome denies. Callers gather the target
//! facts (such as whether the actor is enrolled in a content's owning
//! course) before asking for a verdict, so the policy itself never touches
//! storage and is trivially cheap to recompute.

use uuid::Uuid;

/// Authenticated caller identity as carried by verified token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Account identifier.
    pub id: Uuid,
    /// Unrestricted-write flag.
    pub is_superuser: bool,
}

impl Actor {
    /// Build an actor from token claims.
    pub fn new(id: Uuid, is_superuser: bool) -> Self {
        Self { id, is_superuser }
    }
}

/// Coarse classification of the attempted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Safe operation: retrieve or list.
    Read,
    /// Mutating operation: create, update, or delete.
    Write,
}

/// Outcome of a policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The actor may proceed.
    Allow,
    /// The actor is refused.
    Deny,
}

impl Verdict {
    /// True when the verdict permits the operation.
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Facts about the request a rule may consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AccessContext {
    actor: Actor,
    action: ActionKind,
    /// Whether the actor is enrolled in the target's owning course.
    /// `None` at collection level where no target exists yet.
    enrolled_in_target: Option<bool>,
}

/// A single rule: returns an opinion or abstains.
type Rule = fn(&AccessContext) -> Option<Verdict>;

/// Evaluate rules in order; the first opinion wins, abstention denies.
fn evaluate(rules: &[Rule], ctx: &AccessContext) -> Verdict {
    rules
        .iter()
        .find_map(|rule| rule(ctx))
        .unwrap_or(Verdict::Deny)
}

fn allow_superuser(ctx: &AccessContext) -> Option<Verdict> {
    ctx.actor.is_superuser.then_some(Verdict::Allow)
}

fn allow_read(ctx: &AccessContext) -> Option<Verdict> {
    matches!(ctx.action, ActionKind::Read).then_some(Verdict::Allow)
}

fn allow_enrolled_read(ctx: &AccessContext) -> Option<Verdict> {
    (matches!(ctx.action, ActionKind::Read) && ctx.enrolled_in_target == Some(true))
        .then_some(Verdict::Allow)
}

/// Collection-level check applied before a target resource is resolved.
///
/// Allows superusers unconditionally and any actor for safe (read)
/// operations. Intentionally coarse: it gates write vs. read only and never
/// inspects ownership, which is the object-level check's job.
pub fn collection_access(actor: Actor, action: ActionKind) -> Verdict {
    const RULES: &[Rule] = &[allow_superuser, allow_read];
    evaluate(
        RULES,
        &AccessContext {
            actor,
            action,
            enrolled_in_target: None,
        },
    )
}

/// Object-level check for a resolved content.
///
/// Allows superusers unconditionally, and reads by actors enrolled in the
/// content's owning course (any enrollment status). No non-superuser ever
/// gains write access here, enrolled or not.
pub fn content_object_access(actor: Actor, action: ActionKind, enrolled: bool) -> Verdict {
    const RULES: &[Rule] = &[allow_superuser, allow_enrolled_read];
    evaluate(
        RULES,
        &AccessContext {
            actor,
            action,
            enrolled_in_target: Some(enrolled),
        },
    )
}

/// Enrollment-management check.
///
/// Superusers only, for reads and writes alike.
pub fn enrollment_management(actor: Actor) -> Verdict {
    const RULES: &[Rule] = &[allow_superuser];
    evaluate(
        RULES,
        &AccessContext {
            actor,
            action: ActionKind::Write,
            enrolled_in_target: None,
        },
    )
}
