//! Random discovery over each upstream catalog.
//!
//! Each finder is a [`Resolver`](randomedia_core::Resolver) for one entity
//! kind: it knows how to look a candidate up and which answers count as a
//! real entity. `find` wires it to a sampler through a
//! [`Discovery`](randomedia_core::Discovery) run and shapes the result.
//!
//! | Finder           | Candidate space              | Valid when                          |
//! |------------------|------------------------------|-------------------------------------|
//! | [`MovieFinder`]  | `[0, latest TMDB movie id)`  | Utelly lookup has a collection id   |
//! | [`ShowFinder`]   | `[0, latest TMDB show id)`   | TMDB show has a name                |
//! | [`ArtistFinder`] | `[0, assumed_total)` offsets | Spotify search has no error, 1 item |

pub mod artist;
pub mod movie;
pub mod show;

pub use artist::ArtistFinder;
pub use movie::MovieFinder;
pub use show::ShowFinder;
