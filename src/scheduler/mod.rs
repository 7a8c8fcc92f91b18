// Symbol clock: walks an encoded bitstream and picks a tone per tick

pub mod symbol;
pub mod tick;

pub use symbol::{Advance, Mode, RunOutcome, SchedulerStats, SymbolScheduler};
pub use tick::{IntervalTicker, ScriptedTicks, TickSource, symbol_period};
