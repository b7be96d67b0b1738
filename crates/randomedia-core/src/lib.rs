//! randomedia-core: the random-valid-entity discovery algorithm.
//!
//! Upstream catalogs are sampled by a [`Sampler`], each [`Candidate`] is
//! handed to a [`Resolver`], and a [`Discovery`] drives the two until a
//! candidate passes the resolver's validity check or the
//! [`DiscoveryBudget`] runs out. Nothing here touches the network; the
//! HTTP-backed resolvers live in the `randomedia` crate.

pub mod discovery;
pub mod error;
pub mod sampler;

pub use discovery::{Attempt, Discovered, Discovery, DiscoveryBudget, Rejection, Resolver};
pub use error::{Error, Result};
pub use sampler::{sample, Candidate, CatalogBound, RandomSampler, Sampler, ScriptedSampler};
