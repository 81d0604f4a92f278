//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in nixie-core:
//!
//! - Nixie tube display behind a bit-serial shift register chain

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
