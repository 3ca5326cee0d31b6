//! Challenge flow state machine implementation

use std::sync::Arc;

use crate::domain::entities::audit::AuditEvent;
use crate::domain::entities::user_ref::UserRef;
use crate::errors::DomainResult;
use crate::repositories::audit::AuditSink;
use crate::repositories::credential::CredentialStore;
use crate::services::expiry::Freshness;
use crate::services::otp::{Mailer, OtpCredentialManager, ValidateOutcome};

use super::renderer::{ChallengeRenderer, Notice};

/// Notice shown after a user-requested resend
pub const MSG_CODE_RESENT: &str = "A new code has been sent to your registered email address.";

/// Notice shown when a stale code is transparently replaced
pub const MSG_CODE_EXPIRED: &str =
    "Your code has expired. A new code has been sent to your registered email address.";

/// Notice shown for a wrong code
pub const MSG_INVALID_CODE: &str = "Invalid code. Please try again.";

/// Decoded inbound signal for one flow invocation.
///
/// Decoding raw transport input into this enum is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Plain page request, nothing submitted
    None,
    /// User abandoned the flow
    Cancel,
    /// User asked for a new code
    Resend,
    /// User submitted the form, possibly without a code
    Submit(Option<String>),
}

/// Flow state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Created, entry action not yet run
    Start,
    /// Challenge rendered, waiting for the user
    AwaitingInput,
    /// Authentication step completed
    Succeeded,
    /// Flow discarded
    Aborted,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Succeeded | FlowState::Aborted)
    }
}

/// What the caller should do after one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowResponse {
    /// State after the transition
    pub state: FlowState,
    /// Rendered challenge page, when one should be shown
    pub page: Option<String>,
    /// Non-fatal delivery warning from an issue performed this invocation
    pub delivery_warning: Option<String>,
}

/// Drives the user-facing challenge protocol.
///
/// One flow instance serves one user's authentication step; the
/// surrounding session serializes invocations. Expiry is evaluated on each
/// inbound signal, never by a timer.
pub struct ChallengeFlow<S, M, R, A>
where
    S: CredentialStore,
    M: Mailer,
    R: ChallengeRenderer,
    A: AuditSink,
{
    manager: OtpCredentialManager<S, M>,
    renderer: Arc<R>,
    audit: Arc<A>,
    user: UserRef,
    state: FlowState,
}

impl<S, M, R, A> ChallengeFlow<S, M, R, A>
where
    S: CredentialStore,
    M: Mailer,
    R: ChallengeRenderer,
    A: AuditSink,
{
    pub fn new(
        manager: OtpCredentialManager<S, M>,
        renderer: Arc<R>,
        audit: Arc<A>,
        user: UserRef,
    ) -> Self {
        Self {
            manager,
            renderer,
            audit,
            user,
            state: FlowState::Start,
        }
    }

    /// Current state
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Whether the code factor is offered to this user at all
    pub fn offered(&self) -> bool {
        self.manager.is_configured_for(&self.user)
    }

    /// Entry action: issue a code if none is usable and render the
    /// challenge. A fresh flow has no prior record, so the first call
    /// always issues.
    pub async fn begin(&mut self) -> DomainResult<FlowResponse> {
        if self.state != FlowState::Start {
            return Ok(self.current_response());
        }

        if !self.offered() {
            tracing::warn!(
                realm = %self.user.realm,
                user = %self.user.id,
                event = "factor_not_offered",
                "Code factor requested for user without verified email"
            );
            self.state = FlowState::Aborted;
            return Ok(self.current_response());
        }

        self.state = FlowState::AwaitingInput;
        self.challenge().await
    }

    /// Process one inbound signal.
    ///
    /// Terminal states ignore further signals. In `Start` the entry
    /// action runs first regardless of the signal.
    pub async fn handle(&mut self, signal: Signal) -> DomainResult<FlowResponse> {
        match self.state {
            FlowState::Start => self.begin().await,
            FlowState::Succeeded | FlowState::Aborted => Ok(self.current_response()),
            FlowState::AwaitingInput => match signal {
                Signal::Cancel => {
                    tracing::info!(
                        realm = %self.user.realm,
                        user = %self.user.id,
                        event = "flow_cancelled",
                        "Challenge flow discarded by user"
                    );
                    self.state = FlowState::Aborted;
                    Ok(self.current_response())
                }
                Signal::Resend => {
                    // explicit refresh: reissue regardless of freshness
                    let outcome = self.manager.issue(&self.user).await?;
                    self.record(AuditEvent::code_resent(&self.user)).await;
                    Ok(self.render(Some(Notice::info(MSG_CODE_RESENT)), outcome.delivery_warning))
                }
                Signal::None => self.challenge().await,
                Signal::Submit(code) => self.submit(code.as_deref()).await,
            },
        }
    }

    async fn submit(&mut self, code: Option<&str>) -> DomainResult<FlowResponse> {
        match self.manager.validate(&self.user, code).await? {
            ValidateOutcome::NoInput => Ok(self.render(None, None)),
            outcome if outcome.requires_reissue() => {
                let issued = self.manager.issue(&self.user).await?;
                Ok(self.render(Some(Notice::info(MSG_CODE_EXPIRED)), issued.delivery_warning))
            }
            ValidateOutcome::Invalid => {
                self.record(AuditEvent::invalid_attempt(&self.user)).await;
                Ok(self.render(Some(Notice::error(MSG_INVALID_CODE)), None))
            }
            ValidateOutcome::Valid => {
                tracing::info!(
                    realm = %self.user.realm,
                    user = %self.user.id,
                    event = "flow_succeeded",
                    "Challenge completed"
                );
                self.state = FlowState::Succeeded;
                Ok(self.current_response())
            }
            // NoInput / Expired / NoActiveCode are covered above
            _ => Ok(self.render(None, None)),
        }
    }

    /// Render the challenge, issuing first when no usable code exists.
    /// Mirrors the entry action and plain page re-requests.
    async fn challenge(&mut self) -> DomainResult<FlowResponse> {
        let freshness = self.manager.current_freshness(&self.user).await?;
        if freshness.requires_issue() {
            let outcome = self.manager.issue(&self.user).await?;
            let notice = match freshness {
                Freshness::Expired => Some(Notice::info(MSG_CODE_EXPIRED)),
                _ => None,
            };
            Ok(self.render(notice, outcome.delivery_warning))
        } else {
            Ok(self.render(None, None))
        }
    }

    fn render(&self, primary: Option<Notice>, warning: Option<String>) -> FlowResponse {
        // a primary notice outranks the delivery warning on the page;
        // the warning is still reported separately
        let notice = primary.or_else(|| warning.clone().map(Notice::error));
        FlowResponse {
            state: self.state,
            page: Some(self.renderer.render_challenge(notice.as_ref())),
            delivery_warning: warning,
        }
    }

    fn current_response(&self) -> FlowResponse {
        FlowResponse {
            state: self.state,
            page: None,
            delivery_warning: None,
        }
    }

    async fn record(&self, event: AuditEvent) {
        if let Err(e) = self.audit.record(&event).await {
            tracing::warn!(
                realm = %event.realm,
                user = %event.user_id,
                action = event.action.as_str(),
                error = %e,
                event = "audit_record_failed",
                "Audit sink rejected event"
            );
        }
    }
}
