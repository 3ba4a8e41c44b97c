//! The five pipeline stages.
//!
//! Each stage is a free function over the engine state, invoked by the
//! cycle protocol in reverse latch order (WB, MEM, EX, ID, IF) so every
//! stage consumes its input latch before an earlier stage overwrites it.

mod decode;
mod execute;
mod fetch;
mod memory;
mod writeback;

pub(crate) use self::decode::decode_stage;
pub(crate) use self::execute::execute_stage;
pub(crate) use self::fetch::fetch_stage;
pub(crate) use self::memory::memory_stage;
pub(crate) use self::writeback::writeback_stage;
