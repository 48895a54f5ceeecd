mod equity;

pub use equity::Equity;
