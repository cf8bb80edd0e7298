// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait definitions.
//!
//! Each external integration (enrichment, delivery, LLM) is injected once
//! at construction time as a trait object; business logic never branches
//! on whether the real or mock implementation is behind the seam.

pub mod delivery;
pub mod enrichment;
pub mod llm;

pub use delivery::DeliveryProvider;
pub use enrichment::EnrichmentProvider;
pub use llm::LlmProvider;
