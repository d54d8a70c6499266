pub mod msp;
