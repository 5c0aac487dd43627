//! fit: the user-facing fitting session and its outcome type.
//!
//! ## Purpose
//! Hold the two types users touch most: [`FitOutcome`], the validated
//! record of a successful minimization, and [`FitSession`], which owns a
//! cost model, runs fits, and answers diagnostic queries.
pub mod outcome;
pub mod session;

pub use outcome::FitOutcome;
pub use session::FitSession;
