//! Cost model calculators
//!
//! Four independently testable pure calculators composed by the pipeline:
//! fees, slippage (ask-side depth walk), market impact, and the
//! maker/taker classifier. Each one degrades to a neutral/zero result on
//! missing book data instead of failing.

pub mod fees;
pub mod impact;
pub mod maker_taker;
pub mod slippage;
