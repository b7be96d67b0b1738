//! Sample-until-valid discovery.
//!
//! A [`Discovery`] pairs a [`Sampler`] with a [`Resolver`] and produces a lazy
//! sequence of [`Attempt`]s. Each attempt draws a candidate, resolves it
//! upstream, and runs the resolver's validity check. Invalid candidates and
//! transient upstream failures are recorded and the sequence moves on; a
//! non-transient failure ends the run. The sequence is finite: once the
//! [`DiscoveryBudget`] is spent, [`Discovery::next_attempt`] yields `None`
//! and [`Discovery::run`] reports [`Error::Exhausted`].

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::sampler::{Candidate, CatalogBound, Sampler};

const DEFAULT_MAX_ATTEMPTS: u32 = 50;
const DEFAULT_MAX_ELAPSED: Duration = Duration::from_secs(30);

/// Why a resolved candidate failed its validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    reason: String,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Resolves candidates against one upstream catalog and decides which
/// resolved entities are usable.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Decoded, unvalidated upstream answer for one candidate.
    type Raw: Send;
    /// Entity that passed [`Resolver::validate`].
    type Valid: Send;

    /// Short lowercase name of the entity kind (e.g. `"movie"`).
    fn entity(&self) -> &'static str;

    /// Look the candidate up upstream.
    async fn resolve(&self, candidate: Candidate) -> Result<Self::Raw>;

    /// Validity predicate. Consumes the raw answer so the valid entity can be
    /// built without cloning.
    fn validate(&self, raw: Self::Raw) -> std::result::Result<Self::Valid, Rejection>;
}

/// Outcome of a single sample-and-resolve step.
#[derive(Debug)]
pub enum Attempt<V> {
    /// The candidate resolved to a usable entity.
    Valid {
        number: u32,
        candidate: Candidate,
        entity: V,
    },
    /// The candidate resolved, but the entity failed the validity check.
    Invalid {
        number: u32,
        candidate: Candidate,
        rejection: Rejection,
    },
    /// The upstream call failed in a way worth retrying.
    Failed {
        number: u32,
        candidate: Candidate,
        error: Error,
    },
}

impl<V> Attempt<V> {
    /// 1-based position of this attempt within its run.
    pub fn number(&self) -> u32 {
        match self {
            Attempt::Valid { number, .. }
            | Attempt::Invalid { number, .. }
            | Attempt::Failed { number, .. } => *number,
        }
    }

    pub fn candidate(&self) -> Candidate {
        match self {
            Attempt::Valid { candidate, .. }
            | Attempt::Invalid { candidate, .. }
            | Attempt::Failed { candidate, .. } => *candidate,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Attempt::Valid { .. })
    }
}

/// Limits on a single discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryBudget {
    /// Maximum number of resolution attempts.
    pub max_attempts: u32,
    /// Wall-clock limit, checked before each attempt. `None` disables it.
    pub max_elapsed: Option<Duration>,
}

impl DiscoveryBudget {
    /// Budget bounded by attempt count only.
    pub fn attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            max_elapsed: None,
        }
    }

    /// Add a wall-clock limit.
    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = Some(max_elapsed);
        self
    }
}

impl Default for DiscoveryBudget {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_elapsed: Some(DEFAULT_MAX_ELAPSED),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovered<V> {
    pub entity: V,
    /// Candidate that produced `entity`.
    pub candidate: Candidate,
    /// Number of resolution attempts, including the successful one.
    pub attempts: u32,
}

/// One discovery run over a catalog.
pub struct Discovery<'a, R: Resolver> {
    resolver: &'a R,
    sampler: &'a mut dyn Sampler,
    bound: CatalogBound,
    budget: DiscoveryBudget,
    attempts: u32,
    started: Instant,
    last_failure: Option<String>,
}

impl<'a, R: Resolver> Discovery<'a, R> {
    pub fn new(
        resolver: &'a R,
        sampler: &'a mut dyn Sampler,
        bound: CatalogBound,
        budget: DiscoveryBudget,
    ) -> Self {
        Self {
            resolver,
            sampler,
            bound,
            budget,
            attempts: 0,
            started: Instant::now(),
            last_failure: None,
        }
    }

    /// Attempts made since creation or the last [`restart`](Self::restart).
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_exhausted(&self) -> bool {
        if self.attempts >= self.budget.max_attempts {
            return true;
        }
        self.budget
            .max_elapsed
            .is_some_and(|limit| self.started.elapsed() >= limit)
    }

    /// Reset the attempt counter and clock, keeping sampler state.
    pub fn restart(&mut self) {
        self.attempts = 0;
        self.started = Instant::now();
        self.last_failure = None;
    }

    /// Perform the next attempt.
    ///
    /// Returns `Ok(None)` once the budget is spent and `Err` when the resolver
    /// fails with a non-transient error.
    pub async fn next_attempt(&mut self) -> Result<Option<Attempt<R::Valid>>> {
        if self.is_exhausted() {
            return Ok(None);
        }

        self.attempts += 1;
        let number = self.attempts;
        let candidate = self.sampler.next_candidate(self.bound);
        let entity = self.resolver.entity();

        let attempt = match self.resolver.resolve(candidate).await {
            Ok(raw) => match self.resolver.validate(raw) {
                Ok(valid) => Attempt::Valid {
                    number,
                    candidate,
                    entity: valid,
                },
                Err(rejection) => {
                    debug!(
                        entity,
                        candidate = candidate.get(),
                        attempt = number,
                        reason = %rejection,
                        "Candidate rejected"
                    );
                    self.last_failure = Some(format!("candidate {candidate}: {rejection}"));
                    Attempt::Invalid {
                        number,
                        candidate,
                        rejection,
                    }
                }
            },
            Err(error) if error.is_transient() => {
                warn!(
                    entity,
                    candidate = candidate.get(),
                    attempt = number,
                    error = %error,
                    "Candidate lookup failed, resampling"
                );
                self.last_failure = Some(format!("candidate {candidate}: {error}"));
                Attempt::Failed {
                    number,
                    candidate,
                    error,
                }
            }
            Err(error) => return Err(error),
        };

        Ok(Some(attempt))
    }

    /// Drive attempts until one is valid or the budget is spent.
    pub async fn run(mut self) -> Result<Discovered<R::Valid>> {
        while let Some(attempt) = self.next_attempt().await? {
            if let Attempt::Valid {
                number,
                candidate,
                entity,
            } = attempt
            {
                info!(
                    entity = self.resolver.entity(),
                    candidate = candidate.get(),
                    attempts = number,
                    "Found valid candidate"
                );
                return Ok(Discovered {
                    entity,
                    candidate,
                    attempts: number,
                });
            }
        }

        warn!(
            entity = self.resolver.entity(),
            attempts = self.attempts,
            "Discovery budget exhausted"
        );
        Err(Error::Exhausted {
            entity: self.resolver.entity().to_string(),
            attempts: self.attempts,
            last_failure: self.last_failure.take(),
        })
    }
}
