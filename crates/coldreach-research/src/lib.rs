// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact intake and the company-research state machine.
//!
//! Intake classifies each new contact once, at creation time. Business
//! contacts enter the research lifecycle `pending -> processing ->
//! {complete|failed}`; personal contacts are created terminal at `na` and
//! never transition. Research runs detached from the creating request.

pub mod intake;
pub mod orchestrator;

pub use intake::{ContactIntake, IntakeError};
pub use orchestrator::{ResearchOrchestrator, ResearchOutcome};
