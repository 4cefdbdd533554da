// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Rule-chain route guarding.
//!
//! A route declares an ordered list of [`AccessRule`]s at registration
//! time. The [`Gatekeeper`] evaluates them strictly in declaration order,
//! short-circuiting on the first rule that allows; when no rule allows, the
//! request is denied. Every ownership comparison goes through
//! [`PrincipalId`], so both operands share one canonical representation.

use std::sync::Arc;

use wicket_core::{AnswerId, PrincipalId, Role, StoreError, TicketAnswerStore, TicketId, TicketStore};

use super::context::CurrentUser;

// =============================================================================
// AccessRule
// =============================================================================

/// A single access rule in a route's guard chain.
#[derive(Debug, Clone)]
pub enum AccessRule {
    /// Allow when the principal holds one of the given roles.
    RoleIs(Vec<Role>),
    /// Allow when the path-addressed id is the principal's own id.
    SelfUser,
    /// Allow always, constraining subsequent resource queries to the
    /// principal's own records. The only side-effecting rule.
    SelfUserTickets,
    /// Allow when the request-referenced ticket is owned by the principal.
    SelfUserTicket,
    /// Allow when the body-referenced ticket is owned by the principal.
    SelfTicketTicketAnswers,
    /// Allow when the body-referenced ticket is owned by the principal.
    SelfTicketAnswer,
    /// Allow when the path-addressed answer's parent ticket is owned by the
    /// principal.
    SelfTicketTicketAnswer,
}

impl AccessRule {
    /// Returns `true` if this rule reads a ticket id from the request body.
    pub fn needs_body_ticket(&self) -> bool {
        matches!(
            self,
            AccessRule::SelfTicketTicketAnswers | AccessRule::SelfTicketAnswer
        )
    }
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone)]
pub enum RuleOutcome {
    /// Grant access, optionally constraining later queries to an owner.
    Allow(Option<OwnerScope>),
    /// Refuse access outright, without consulting later rules.
    Deny,
    /// Pass judgement to the next rule in the chain.
    Continue,
}

/// Constrains a resource query to one owner's records.
///
/// Emitted by [`AccessRule::SelfUserTickets`] and inserted into request
/// extensions; list handlers apply it as an implicit query filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerScope(pub PrincipalId);

/// Final authorization verdict for a request.
#[derive(Debug, Clone)]
pub enum Verdict {
    /// Access granted, with the owner scope if a scoping rule allowed.
    Granted {
        /// Query constraint to apply downstream, if any.
        scope: Option<OwnerScope>,
    },
    /// Access denied (HTTP 403 at the boundary).
    Denied,
}

impl Verdict {
    /// Returns `true` if access was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Verdict::Granted { .. })
    }
}

// =============================================================================
// RequestContext
// =============================================================================

/// The resource ids a request carries, extracted once before evaluation.
///
/// Fixed for the lifetime of one authorization decision; rules never read
/// the raw request themselves.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// The id addressed by the path (`/{id}`).
    pub subject_id: Option<String>,
    /// The ticket id referenced by the request (query `id`, falling back to
    /// the path id).
    pub ticket_ref: Option<String>,
    /// The ticket id carried in a JSON body (`{"ticket": ...}`).
    pub body_ticket: Option<String>,
}

impl RequestContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path-addressed id.
    pub fn with_subject_id(mut self, id: impl Into<String>) -> Self {
        self.subject_id = Some(id.into());
        self
    }

    /// Sets the request-referenced ticket id.
    pub fn with_ticket_ref(mut self, id: impl Into<String>) -> Self {
        self.ticket_ref = Some(id.into());
        self
    }

    /// Sets the body-carried ticket id.
    pub fn with_body_ticket(mut self, id: impl Into<String>) -> Self {
        self.body_ticket = Some(id.into());
        self
    }
}

// =============================================================================
// Gatekeeper
// =============================================================================

/// Evaluates a route's rule chain against the authenticated principal.
///
/// Created once at router construction and shared across requests. Every
/// resource lookup is an independent fresh read; there is no cache shared
/// between rules within one evaluation.
#[derive(Clone)]
pub struct Gatekeeper {
    tickets: Arc<dyn TicketStore>,
    answers: Arc<dyn TicketAnswerStore>,
}

impl Gatekeeper {
    /// Creates a new gatekeeper over the given stores.
    pub fn new(tickets: Arc<dyn TicketStore>, answers: Arc<dyn TicketAnswerStore>) -> Self {
        Self { tickets, answers }
    }

    /// Evaluates the rules in declaration order.
    ///
    /// Short-circuits on the first `Allow` (carrying its owner scope, if
    /// any) or `Deny`; exhausting the chain denies. Store failure aborts
    /// the decision entirely rather than denying, so an outage is never
    /// mistaken for a policy verdict.
    pub async fn authorize(
        &self,
        user: &CurrentUser,
        rules: &[AccessRule],
        ctx: &RequestContext,
    ) -> Result<Verdict, StoreError> {
        for rule in rules {
            match self.evaluate(user, rule, ctx).await? {
                RuleOutcome::Allow(scope) => return Ok(Verdict::Granted { scope }),
                RuleOutcome::Deny => return Ok(Verdict::Denied),
                RuleOutcome::Continue => {}
            }
        }
        Ok(Verdict::Denied)
    }

    /// Evaluates a single rule.
    ///
    /// A lookup that misses yields `Continue`: the request falls through to
    /// the remaining rules and, absent another allow, ends in a plain
    /// denial rather than a distinct not-found error.
    async fn evaluate(
        &self,
        user: &CurrentUser,
        rule: &AccessRule,
        ctx: &RequestContext,
    ) -> Result<RuleOutcome, StoreError> {
        let outcome = match rule {
            AccessRule::RoleIs(roles) => {
                if user.has_any_role(roles) {
                    RuleOutcome::Allow(None)
                } else {
                    RuleOutcome::Continue
                }
            }

            AccessRule::SelfUser => match ctx.subject_id.as_deref() {
                Some(id) if PrincipalId::from(id) == user.id => RuleOutcome::Allow(None),
                _ => RuleOutcome::Continue,
            },

            AccessRule::SelfUserTickets => {
                RuleOutcome::Allow(Some(OwnerScope(user.id.clone())))
            }

            AccessRule::SelfUserTicket => {
                self.ticket_owned_by(ctx.ticket_ref.as_deref(), &user.id).await?
            }

            AccessRule::SelfTicketTicketAnswers | AccessRule::SelfTicketAnswer => {
                self.ticket_owned_by(ctx.body_ticket.as_deref(), &user.id).await?
            }

            AccessRule::SelfTicketTicketAnswer => {
                let Some(answer_id) = ctx.subject_id.as_deref() else {
                    return Ok(RuleOutcome::Continue);
                };

                match self.answers.find_by_id(&AnswerId::new(answer_id)).await? {
                    Some(answer) => {
                        self.ticket_owned_by(Some(answer.ticket.as_str()), &user.id)
                            .await?
                    }
                    None => RuleOutcome::Continue,
                }
            }
        };

        Ok(outcome)
    }

    /// Looks up a ticket and checks its owner.
    async fn ticket_owned_by(
        &self,
        ticket_id: Option<&str>,
        owner: &PrincipalId,
    ) -> Result<RuleOutcome, StoreError> {
        let Some(ticket_id) = ticket_id else {
            return Ok(RuleOutcome::Continue);
        };

        let outcome = match self.tickets.find_by_id(&TicketId::new(ticket_id)).await? {
            Some(ticket) if ticket.is_owned_by(owner) => RuleOutcome::Allow(None),
            _ => RuleOutcome::Continue,
        };
        Ok(outcome)
    }
}

impl std::fmt::Debug for Gatekeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gatekeeper").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
