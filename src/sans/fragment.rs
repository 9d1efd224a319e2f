//! Reassembly of messages split across several sentences.

use either::Either::{self, Left, Right};
use thiserror::Error;

use super::{
    bits::{BitBuffer, BitError, armor_to_bits},
    check::{EnvelopeError, validate},
    sentence::{FieldError, FragmentInfo, extract_body, fragment_info},
};

/// An armored payload and its trailing pad bit count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPayload {
    body: String,
    pad_bits: u32,
}

impl BitPayload {
    pub fn new(body: impl Into<String>, pad_bits: u32) -> Self {
        Self {
            body: body.into(),
            pad_bits,
        }
    }

    /// The armored characters.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn pad_bits(&self) -> u32 {
        self.pad_bits
    }

    /// Number of message bits, excluding pad bits.
    pub fn usable_bits(&self) -> usize {
        (self.body.len() * 6).saturating_sub(self.pad_bits as usize)
    }

    /// Convert the payload to bits, discarding pad bits.
    pub fn to_bits(&self) -> Result<BitBuffer, BitError> {
        Ok(armor_to_bits(&self.body)?.without_pad(self.pad_bits))
    }
}

/// An error accepting a sentence into a fragment train.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentError {
    /// The sentence envelope or checksum is invalid.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    /// A sentence field could not be parsed.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// The sentence does not continue the train.
    #[error("Expected fragment {expected:?}, found {found:?}.")]
    BadFragmentSequence {
        expected: FragmentInfo,
        found: FragmentInfo,
    },
}

/// State token accumulating the fragments of one message.
///
/// Created from the first sentence of a train, and consumed by each
/// successive sentence until the train is complete.
#[derive(Debug)]
pub struct FragmentGroup {
    total_fragments: u32,
    fragments_seen: u32,
    sequence_id: Option<u8>,
    payload_accum: String,
    trailing_pad_bits: u32,
}

impl FragmentGroup {
    /// Begin a train with its first sentence.
    ///
    /// Returns the completed payload for single-sentence messages, otherwise
    /// a successor state token.
    pub fn begin(sentence: &str) -> Result<Either<FragmentGroup, BitPayload>, FragmentError> {
        validate(sentence)?;
        let found = fragment_info(sentence)?;

        let expected = FragmentInfo { number: 1, ..found };
        if found != expected {
            Err(FragmentError::BadFragmentSequence { expected, found })?;
        }

        let (body, pad_bits) = extract_body(sentence, 0)?;

        let group = FragmentGroup {
            total_fragments: found.total,
            fragments_seen: 1,
            sequence_id: found.sequence_id,
            payload_accum: body.to_string(),
            trailing_pad_bits: pad_bits,
        };

        Ok(group.complete())
    }

    /// Transition to another state by accepting the next sentence of the
    /// train.
    ///
    /// Returns the completed payload once every fragment has been seen,
    /// otherwise a successor state token.
    pub fn advance(
        self,
        sentence: &str,
    ) -> Result<Either<FragmentGroup, BitPayload>, FragmentError> {
        validate(sentence)?;
        let found = fragment_info(sentence)?;

        let expected = FragmentInfo {
            total: self.total_fragments,
            number: self.fragments_seen + 1,
            sequence_id: self.sequence_id,
        };
        if found != expected {
            Err(FragmentError::BadFragmentSequence { expected, found })?;
        }

        let (body, pad_bits) = extract_body(sentence, 0)?;

        let mut group = self;
        group.payload_accum.push_str(body);
        group.trailing_pad_bits = pad_bits;
        group.fragments_seen += 1;

        Ok(group.complete())
    }

    /// Number of sentences in the train.
    pub fn total_fragments(&self) -> u32 {
        self.total_fragments
    }

    /// Number of sentences accepted so far.
    pub fn fragments_seen(&self) -> u32 {
        self.fragments_seen
    }

    pub fn sequence_id(&self) -> Option<u8> {
        self.sequence_id
    }

    fn complete(self) -> Either<FragmentGroup, BitPayload> {
        if self.fragments_seen < self.total_fragments {
            Left(self)
        } else {
            Right(BitPayload::new(self.payload_accum, self.trailing_pad_bits))
        }
    }
}

/// An error reassembling a message from a run of sentences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReassemblyError {
    /// Fewer sentences remain than the first fragment announces.
    #[error("Only {available} sentences remain for a train of {needed}.")]
    InsufficientFragments { needed: u32, available: usize },
    /// A sentence was rejected after `consumed` sentences were accepted.
    #[error("Reassembly stopped after {consumed} sentences: {source}")]
    Fragment {
        consumed: usize,
        source: FragmentError,
    },
}

impl ReassemblyError {
    /// Number of sentences accepted before the failure.
    ///
    /// The rejected sentence itself is not counted, so reassembly may be
    /// retried starting at it.
    pub fn consumed(&self) -> usize {
        match self {
            Self::InsufficientFragments { .. } => 0,
            Self::Fragment { consumed, .. } => *consumed,
        }
    }
}

/// Reassemble one message from consecutive sentences starting at an index.
///
/// Returns the payload and the number of sentences it spans.
pub fn reassemble(
    sentences: &[impl AsRef<str>],
    start: usize,
) -> Result<(BitPayload, usize), ReassemblyError> {
    let remaining = sentences.get(start..).unwrap_or_default();

    let Some((first, rest)) = remaining.split_first() else {
        Err(ReassemblyError::InsufficientFragments {
            needed: 1,
            available: 0,
        })?
    };

    let fail = |consumed| move |source| ReassemblyError::Fragment { consumed, source };

    let mut group = match FragmentGroup::begin(first.as_ref()).map_err(fail(0))? {
        Left(group) => group,
        Right(payload) => return Ok((payload, 1)),
    };

    let needed = group.total_fragments();
    if needed as usize > remaining.len() {
        Err(ReassemblyError::InsufficientFragments {
            needed,
            available: remaining.len(),
        })?;
    }

    for (i, sentence) in rest.iter().enumerate() {
        group = match group.advance(sentence.as_ref()).map_err(fail(i + 1))? {
            Left(group) => group,
            Right(payload) => return Ok((payload, i + 2)),
        };
    }

    Err(ReassemblyError::InsufficientFragments {
        needed,
        available: remaining.len(),
    })
}
