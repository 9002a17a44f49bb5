//! Text cleanup applied to incoming survey questions.
//!
//! # Responsibility
//! - Turn pasted free text into comparable question lines.
//! - Mask course/instructor names before anything is stored or compared.

pub mod normalize;
