// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod common;

#[cfg(test)]
mod parsing;

#[cfg(test)]
mod rendering;

#[cfg(test)]
mod conversion;

#[cfg(test)]
mod roundtrip;
