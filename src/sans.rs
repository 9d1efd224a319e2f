//! Low-level building blocks for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoding, such as those managing their own sentence buffers or
//! reassembling fragments as they arrive. See [`crate::avec`] for
//! implementations covering common decoding patterns.
//!
//! # Architecture
//!
//! Decoding proceeds leaf to root:
//!
//! 1. Each sentence is checked by [`check::validate`], and its fields split
//! out by the [`sentence`] helpers.
//!
//! 2. Sentences are accumulated into a [`fragment::BitPayload`]. Reassembly
//! is represented by a non-copy state token, [`Decoder`], created from the
//! first sentence of a train. Transition to another state by calling the
//! token's `advance` method with the next sentence. This returns either a
//! successor token or the completed payload.
//!
//! 3. The payload's header is read by [`header::decode_header`], and its
//! fields by [`message::dispatch`] (or both at once by [`message::decode`]),
//! yielding a [`data::DecodedMessage`].
//!
//! Some areas of the decoding process are not represented in the state
//! machine and must be carefully written:
//!
//! - Keeping fragments of interleaved trains apart. Sentences of one train
//! must be supplied in order, with nothing in between.
//!
//! - Recovering from a rejected sentence. A rejected sentence may begin a new
//! train, so it should be retried as the first sentence of one.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod bits;
pub mod check;
pub mod data;
pub mod fragment;
pub mod header;
pub mod message;
pub mod sentence;

/// Entrypoint to the reassembly state machine.
pub type Decoder = fragment::FragmentGroup;
