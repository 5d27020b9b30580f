//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                ┌──────────────────────────┐
//!   CLI ───────▶ │  inbound::OperatorPort   │
//!                └────────────┬─────────────┘
//!                             ▼
//!                ┌──────────────────────────┐
//!                │   Settlement Engine      │
//!                └──┬─────────┬─────────┬───┘
//!                   ▼         ▼         ▼
//!             WagerStore  MapResult  FlatExtract
//!             EventDir.   Store      (+ IdentityMatcher)
//! ```
//!
//! Both result sources are read-only and share the [`outbound::source::ResultSource`]
//! capability, so resolvers never depend on a storage technology.

pub mod inbound;
pub mod outbound;
