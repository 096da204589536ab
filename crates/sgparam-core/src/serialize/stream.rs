use crate::{
    model::DataType,
    serialize::{Reader, SerializeError, Site, Writer, cbor},
    value::Scalar,
};
use serde::{Deserialize, Serialize};
use sgparam_primitives::PrimitiveType;
use std::collections::VecDeque;

///
/// Token
///
/// One protocol call as recorded by [`StreamWriter`].
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Token {
    TypeBegin { path: String, datatype: DataType },
    TypeEnd { path: String },
    ContBegin { len_y: usize, len_x: usize },
    ContEnd,
    ItemBegin { y: usize, x: usize },
    ItemEnd,
    StringBegin { len: usize },
    StringEnd,
    StringEntryBegin { i: usize },
    StringEntryEnd,
    SparseBegin { vec_index: i32, len: usize },
    SparseEnd,
    SparseEntryBegin { feat_index: i32, i: usize },
    SparseEntryEnd,
    ObjectBegin {
        class_name: String,
        generic: Option<PrimitiveType>,
    },
    ObjectEnd,
    Scalar(Scalar),
}

///
/// StreamWriter
///
/// In-memory [`Writer`] recording the call sequence as tokens.
/// An optional token limit makes the writer fail once it is reached.
///

#[derive(Clone, Debug, Default)]
pub struct StreamWriter {
    tokens: Vec<Token>,
    token_limit: Option<usize>,
}

impl StreamWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer that refuses every call after `limit` tokens.
    #[must_use]
    pub const fn with_token_limit(limit: usize) -> Self {
        Self {
            tokens: Vec::new(),
            token_limit: Some(limit),
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Encode the recorded stream as CBOR.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        cbor::serialize(&self.tokens)
    }

    fn push(&mut self, site: Site<'_>, token: Token) -> Result<(), SerializeError> {
        if let Some(limit) = self.token_limit
            && self.tokens.len() >= limit
        {
            return Err(SerializeError::Backend {
                path: site.path(),
                message: format!("token limit of {limit} reached"),
            });
        }

        self.tokens.push(token);

        Ok(())
    }
}

impl Writer for StreamWriter {
    fn write_type_begin(&mut self, site: Site<'_>) -> Result<(), SerializeError> {
        self.push(
            site,
            Token::TypeBegin {
                path: site.path(),
                datatype: site.datatype,
            },
        )
    }

    fn write_type_end(&mut self, site: Site<'_>) -> Result<(), SerializeError> {
        self.push(site, Token::TypeEnd { path: site.path() })
    }

    fn write_cont_begin(
        &mut self,
        site: Site<'_>,
        len_y: usize,
        len_x: usize,
    ) -> Result<(), SerializeError> {
        self.push(site, Token::ContBegin { len_y, len_x })
    }

    fn write_cont_end(&mut self, site: Site<'_>, _: usize, _: usize) -> Result<(), SerializeError> {
        self.push(site, Token::ContEnd)
    }

    fn write_item_begin(&mut self, site: Site<'_>, y: usize, x: usize) -> Result<(), SerializeError> {
        self.push(site, Token::ItemBegin { y, x })
    }

    fn write_item_end(&mut self, site: Site<'_>, _: usize, _: usize) -> Result<(), SerializeError> {
        self.push(site, Token::ItemEnd)
    }

    fn write_string_begin(&mut self, site: Site<'_>, len: usize) -> Result<(), SerializeError> {
        self.push(site, Token::StringBegin { len })
    }

    fn write_string_end(&mut self, site: Site<'_>, _: usize) -> Result<(), SerializeError> {
        self.push(site, Token::StringEnd)
    }

    fn write_stringentry_begin(&mut self, site: Site<'_>, i: usize) -> Result<(), SerializeError> {
        self.push(site, Token::StringEntryBegin { i })
    }

    fn write_stringentry_end(&mut self, site: Site<'_>, _: usize) -> Result<(), SerializeError> {
        self.push(site, Token::StringEntryEnd)
    }

    fn write_sparse_begin(
        &mut self,
        site: Site<'_>,
        vec_index: i32,
        len: usize,
    ) -> Result<(), SerializeError> {
        self.push(site, Token::SparseBegin { vec_index, len })
    }

    fn write_sparse_end(&mut self, site: Site<'_>, _: i32, _: usize) -> Result<(), SerializeError> {
        self.push(site, Token::SparseEnd)
    }

    fn write_sparseentry_begin(
        &mut self,
        site: Site<'_>,
        feat_index: i32,
        i: usize,
    ) -> Result<(), SerializeError> {
        self.push(site, Token::SparseEntryBegin { feat_index, i })
    }

    fn write_sparseentry_end(
        &mut self,
        site: Site<'_>,
        _: i32,
        _: usize,
    ) -> Result<(), SerializeError> {
        self.push(site, Token::SparseEntryEnd)
    }

    fn write_object_begin(
        &mut self,
        site: Site<'_>,
        class_name: &str,
        generic: Option<PrimitiveType>,
    ) -> Result<(), SerializeError> {
        self.push(
            site,
            Token::ObjectBegin {
                class_name: class_name.to_string(),
                generic,
            },
        )
    }

    fn write_object_end(
        &mut self,
        site: Site<'_>,
        _: &str,
        _: Option<PrimitiveType>,
    ) -> Result<(), SerializeError> {
        self.push(site, Token::ObjectEnd)
    }

    fn write_scalar(&mut self, site: Site<'_>, value: Scalar) -> Result<(), SerializeError> {
        self.push(site, Token::Scalar(value))
    }
}

///
/// StreamReader
///
/// [`Reader`] over a recorded token stream. Every call checks that the next
/// token is the one the protocol expects, including field paths and types.
///

#[derive(Clone, Debug, Default)]
pub struct StreamReader {
    tokens: VecDeque<Token>,
}

impl StreamReader {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    /// Decode a CBOR token stream, bounded by the default size limit.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        cbor::deserialize(bytes).map(Self::new)
    }

    pub fn from_bytes_bounded(bytes: &[u8], max_bytes: usize) -> Result<Self, SerializeError> {
        cbor::deserialize_bounded(bytes, max_bytes).map(Self::new)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Pop the next token and hand it to `accept`, which gives the token back
    /// when it is not the expected one.
    fn take<R>(
        &mut self,
        site: Site<'_>,
        expected: &str,
        accept: impl FnOnce(Token) -> Result<R, Token>,
    ) -> Result<R, SerializeError> {
        let Some(token) = self.tokens.pop_front() else {
            return Err(SerializeError::EndOfStream {
                path: site.path(),
                expected: expected.to_string(),
            });
        };

        accept(token).map_err(|found| SerializeError::Protocol {
            path: site.path(),
            expected: expected.to_string(),
            found: format!("{found:?}"),
        })
    }
}

impl Reader for StreamReader {
    fn read_type_begin(&mut self, site: Site<'_>) -> Result<(), SerializeError> {
        let path = site.path();
        let expected = format!("type_begin `{path}` of {}", site.datatype);

        self.take(site, &expected, |token| match token {
            Token::TypeBegin {
                path: ref p,
                datatype,
            } if *p == path && datatype == site.datatype => Ok(()),
            other => Err(other),
        })
    }

    fn read_type_end(&mut self, site: Site<'_>) -> Result<(), SerializeError> {
        let path = site.path();

        self.take(site, "type_end", |token| match token {
            Token::TypeEnd { path: ref p } if *p == path => Ok(()),
            other => Err(other),
        })
    }

    fn read_cont_begin(&mut self, site: Site<'_>) -> Result<(usize, usize), SerializeError> {
        self.take(site, "cont_begin", |token| match token {
            Token::ContBegin { len_y, len_x } => Ok((len_y, len_x)),
            other => Err(other),
        })
    }

    fn read_cont_end(&mut self, site: Site<'_>, _: usize, _: usize) -> Result<(), SerializeError> {
        self.take(site, "cont_end", |token| match token {
            Token::ContEnd => Ok(()),
            other => Err(other),
        })
    }

    fn read_item_begin(&mut self, site: Site<'_>, y: usize, x: usize) -> Result<(), SerializeError> {
        self.take(site, &format!("item_begin ({y}, {x})"), |token| match token {
            Token::ItemBegin { y: ty, x: tx } if ty == y && tx == x => Ok(()),
            other => Err(other),
        })
    }

    fn read_item_end(&mut self, site: Site<'_>, _: usize, _: usize) -> Result<(), SerializeError> {
        self.take(site, "item_end", |token| match token {
            Token::ItemEnd => Ok(()),
            other => Err(other),
        })
    }

    fn read_string_begin(&mut self, site: Site<'_>) -> Result<usize, SerializeError> {
        self.take(site, "string_begin", |token| match token {
            Token::StringBegin { len } => Ok(len),
            other => Err(other),
        })
    }

    fn read_string_end(&mut self, site: Site<'_>, _: usize) -> Result<(), SerializeError> {
        self.take(site, "string_end", |token| match token {
            Token::StringEnd => Ok(()),
            other => Err(other),
        })
    }

    fn read_stringentry_begin(&mut self, site: Site<'_>, i: usize) -> Result<(), SerializeError> {
        self.take(site, &format!("stringentry_begin {i}"), |token| match token {
            Token::StringEntryBegin { i: ti } if ti == i => Ok(()),
            other => Err(other),
        })
    }

    fn read_stringentry_end(&mut self, site: Site<'_>, _: usize) -> Result<(), SerializeError> {
        self.take(site, "stringentry_end", |token| match token {
            Token::StringEntryEnd => Ok(()),
            other => Err(other),
        })
    }

    fn read_sparse_begin(&mut self, site: Site<'_>) -> Result<(i32, usize), SerializeError> {
        self.take(site, "sparse_begin", |token| match token {
            Token::SparseBegin { vec_index, len } => Ok((vec_index, len)),
            other => Err(other),
        })
    }

    fn read_sparse_end(&mut self, site: Site<'_>, _: i32, _: usize) -> Result<(), SerializeError> {
        self.take(site, "sparse_end", |token| match token {
            Token::SparseEnd => Ok(()),
            other => Err(other),
        })
    }

    fn read_sparseentry_begin(&mut self, site: Site<'_>, i: usize) -> Result<i32, SerializeError> {
        self.take(site, &format!("sparseentry_begin {i}"), |token| match token {
            Token::SparseEntryBegin { feat_index, i: ti } if ti == i => Ok(feat_index),
            other => Err(other),
        })
    }

    fn read_sparseentry_end(
        &mut self,
        site: Site<'_>,
        _: i32,
        _: usize,
    ) -> Result<(), SerializeError> {
        self.take(site, "sparseentry_end", |token| match token {
            Token::SparseEntryEnd => Ok(()),
            other => Err(other),
        })
    }

    fn read_object_begin(
        &mut self,
        site: Site<'_>,
    ) -> Result<(String, Option<PrimitiveType>), SerializeError> {
        self.take(site, "object_begin", |token| match token {
            Token::ObjectBegin {
                class_name,
                generic,
            } => Ok((class_name, generic)),
            other => Err(other),
        })
    }

    fn read_object_end(
        &mut self,
        site: Site<'_>,
        _: &str,
        _: Option<PrimitiveType>,
    ) -> Result<(), SerializeError> {
        self.take(site, "object_end", |token| match token {
            Token::ObjectEnd => Ok(()),
            other => Err(other),
        })
    }

    fn read_scalar(&mut self, site: Site<'_>) -> Result<Scalar, SerializeError> {
        self.take(site, "scalar", |token| match token {
            Token::Scalar(value) => Ok(value),
            other => Err(other),
        })
    }

    fn remaining_hint(&self) -> Option<usize> {
        Some(self.tokens.len())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::SerializeErrorKind;

    fn site() -> Site<'static> {
        Site {
            datatype: DataType::scalar(PrimitiveType::Int32),
            name: "width",
            prefix: "kernel/",
        }
    }

    #[test]
    fn reader_replays_writer_calls() {
        let mut w = StreamWriter::new();
        w.write_type_begin(site()).expect("type_begin");
        w.write_scalar(site(), Scalar::Int32(5)).expect("scalar");
        w.write_type_end(site()).expect("type_end");

        let bytes = w.to_bytes().expect("encode");
        let mut r = StreamReader::from_bytes(&bytes).expect("decode");

        r.read_type_begin(site()).expect("type_begin");
        assert_eq!(r.read_scalar(site()).expect("scalar"), Scalar::Int32(5));
        r.read_type_end(site()).expect("type_end");
        assert!(r.is_finished());
    }

    #[test]
    fn reader_rejects_foreign_path() {
        let mut w = StreamWriter::new();
        w.write_type_begin(site()).expect("type_begin");

        let other = Site {
            name: "height",
            ..site()
        };
        let err = StreamReader::new(w.into_tokens())
            .read_type_begin(other)
            .expect_err("path differs");

        assert_eq!(err.kind(), SerializeErrorKind::Protocol);
    }

    #[test]
    fn reader_reports_end_of_stream() {
        let err = StreamReader::default()
            .read_scalar(site())
            .expect_err("empty stream");

        assert_eq!(err.kind(), SerializeErrorKind::EndOfStream);
    }

    #[test]
    fn token_limit_fails_the_call_that_exceeds_it() {
        let mut w = StreamWriter::with_token_limit(1);
        w.write_type_begin(site()).expect("first call fits");

        let err = w.write_type_end(site()).expect_err("limit reached");
        assert_eq!(err.kind(), SerializeErrorKind::Backend);
        assert_eq!(w.tokens().len(), 1);
    }
}
