//! Wavefront OBJ parser producing deduplicated, flat mesh buffers.
//!
//! Subset handled: `v`/`vn`/`vt` attribute lines and `f` faces (triangles and
//! quads, quads fan-triangulated). Everything else (`mtllib`, `usemtl`, `o`,
//! `g`, `s`, comments, blank lines) is skipped. Face corners are deduplicated
//! by their raw token text, so `1/1/1` seen twice yields one emitted vertex;
//! `1` and `01` do not collapse.

use std::collections::HashMap;

use thiserror::Error;

use crate::mesh::MeshBuffers;

/// Parse failure, located by 1-based source line.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("malformed OBJ at line {line}: {reason}")]
pub struct MalformedObj {
    pub line: usize,
    pub reason: MalformedKind,
}

impl MalformedObj {
    fn new(line: usize, reason: MalformedKind) -> Self {
        Self { line, reason }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedKind {
    #[error("expected {expected} values after '{directive}'")]
    FieldCount {
        directive: &'static str,
        expected: usize,
    },
    #[error("invalid float '{0}'")]
    BadFloat(String),
    #[error("face has {0} corners, expected 3 or 4")]
    FaceArity(usize),
    #[error("malformed face corner '{0}'")]
    BadCorner(String),
    #[error("{what} index out of range in face corner '{token}'")]
    IndexOutOfRange {
        token: String,
        what: &'static str,
    },
    #[error("face corner '{token}' is missing a {what} index")]
    MissingIndex {
        token: String,
        what: &'static str,
    },
    #[error("mesh exceeds the u32 vertex limit")]
    TooManyVertices,
}

/// Raw attribute pools, accumulated in file order. Scratch state only;
/// indices referenced by faces are 1-based in the source text.
#[derive(Default)]
struct Pools {
    positions: Vec<f32>,
    normals: Vec<f32>,
    texcoords: Vec<f32>,
}

/// Output accumulator for the face-processing pass.
#[derive(Default)]
struct Unpacked {
    positions: Vec<f32>,
    normals: Vec<f32>,
    texcoords: Vec<f32>,
    indices: Vec<u32>,
    // Raw corner token -> emitted vertex index, first-seen order.
    seen: HashMap<String, u32>,
}

/// Parse OBJ text into deduplicated mesh buffers.
///
/// Two passes over the lines: the first fills the attribute pools, the second
/// resolves faces against the complete pools, so faces may legally precede
/// the attributes they reference.
pub fn parse_obj(text: &str) -> Result<MeshBuffers, MalformedObj> {
    let mut pools = Pools::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut tokens = line.trim().split_whitespace();
        match tokens.next() {
            Some("v") => push_fields(&mut pools.positions, tokens, "v", 3, line_no)?,
            Some("vn") => push_fields(&mut pools.normals, tokens, "vn", 3, line_no)?,
            Some("vt") => push_fields(&mut pools.texcoords, tokens, "vt", 2, line_no)?,
            _ => {}
        }
    }

    let mut out = Unpacked::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut tokens = line.trim().split_whitespace();
        if tokens.next() != Some("f") {
            continue;
        }

        let corners: Vec<&str> = tokens.collect();
        let quad = match corners.len() {
            3 => false,
            4 => true,
            n => return Err(MalformedObj::new(line_no, MalformedKind::FaceArity(n))),
        };

        let mut resolved = [0u32; 4];
        for (i, token) in corners.iter().enumerate() {
            resolved[i] = out.resolve(token, &pools, line_no)?;
        }

        // Fan triangulation: {c0,c1,c2} and, for quads, {c0,c2,c3}.
        out.indices
            .extend_from_slice(&[resolved[0], resolved[1], resolved[2]]);
        if quad {
            out.indices
                .extend_from_slice(&[resolved[0], resolved[2], resolved[3]]);
        }
    }

    Ok(MeshBuffers {
        positions: out.positions,
        normals: out.normals,
        texcoords: out.texcoords,
        indices: out.indices,
    })
}

impl Unpacked {
    /// Resolve one face corner token to an emitted vertex index, emitting
    /// attribute data the first time the token is seen.
    fn resolve(
        &mut self,
        token: &str,
        pools: &Pools,
        line_no: usize,
    ) -> Result<u32, MalformedObj> {
        if let Some(&index) = self.seen.get(token) {
            return Ok(index);
        }

        let mut fields = token.split('/');
        let pos = fields.next().filter(|f| !f.is_empty());
        let tex = fields.next().filter(|f| !f.is_empty());
        let norm = fields.next().filter(|f| !f.is_empty());
        if fields.next().is_some() {
            return Err(MalformedObj::new(
                line_no,
                MalformedKind::BadCorner(token.to_string()),
            ));
        }

        let pi = match pos {
            Some(field) => pool_index(field, token, line_no)?,
            None => {
                return Err(MalformedObj::new(
                    line_no,
                    MalformedKind::MissingIndex {
                        token: token.to_string(),
                        what: "position",
                    },
                ));
            }
        };
        let xyz = pools
            .positions
            .get(3 * pi..3 * pi + 3)
            .ok_or_else(|| {
                MalformedObj::new(
                    line_no,
                    MalformedKind::IndexOutOfRange {
                        token: token.to_string(),
                        what: "position",
                    },
                )
            })?;
        self.positions.extend_from_slice(xyz);

        // Texcoords and normals are emitted only if the file declared any;
        // a field given for an empty pool is ignored, matching the format
        // subset's reference behavior.
        if !pools.texcoords.is_empty() {
            let ti = match tex {
                Some(field) => pool_index(field, token, line_no)?,
                None => {
                    return Err(MalformedObj::new(
                        line_no,
                        MalformedKind::MissingIndex {
                            token: token.to_string(),
                            what: "texcoord",
                        },
                    ));
                }
            };
            let uv = pools.texcoords.get(2 * ti..2 * ti + 2).ok_or_else(|| {
                MalformedObj::new(
                    line_no,
                    MalformedKind::IndexOutOfRange {
                        token: token.to_string(),
                        what: "texcoord",
                    },
                )
            })?;
            self.texcoords.extend_from_slice(uv);
        }

        if !pools.normals.is_empty() {
            let ni = match norm {
                Some(field) => pool_index(field, token, line_no)?,
                None => {
                    return Err(MalformedObj::new(
                        line_no,
                        MalformedKind::MissingIndex {
                            token: token.to_string(),
                            what: "normal",
                        },
                    ));
                }
            };
            let n = pools.normals.get(3 * ni..3 * ni + 3).ok_or_else(|| {
                MalformedObj::new(
                    line_no,
                    MalformedKind::IndexOutOfRange {
                        token: token.to_string(),
                        what: "normal",
                    },
                )
            })?;
            self.normals.extend_from_slice(n);
        }

        let index = u32::try_from(self.seen.len())
            .map_err(|_| MalformedObj::new(line_no, MalformedKind::TooManyVertices))?;
        self.seen.insert(token.to_string(), index);
        Ok(index)
    }
}

/// Parse exactly `expected` floats into `dst`; extra or missing fields and
/// non-float tokens are errors.
fn push_fields(
    dst: &mut Vec<f32>,
    mut tokens: std::str::SplitWhitespace<'_>,
    directive: &'static str,
    expected: usize,
    line_no: usize,
) -> Result<(), MalformedObj> {
    for _ in 0..expected {
        let token = tokens.next().ok_or_else(|| {
            MalformedObj::new(line_no, MalformedKind::FieldCount { directive, expected })
        })?;
        let value = token.parse::<f32>().map_err(|_| {
            MalformedObj::new(line_no, MalformedKind::BadFloat(token.to_string()))
        })?;
        dst.push(value);
    }
    if tokens.next().is_some() {
        return Err(MalformedObj::new(
            line_no,
            MalformedKind::FieldCount { directive, expected },
        ));
    }
    Ok(())
}

/// Convert a 1-based source index field to a 0-based pool index.
fn pool_index(field: &str, token: &str, line_no: usize) -> Result<usize, MalformedObj> {
    match field.parse::<u32>() {
        Ok(0) | Err(_) => Err(MalformedObj::new(
            line_no,
            MalformedKind::BadCorner(token.to_string()),
        )),
        Ok(value) => Ok(value as usize - 1),
    }
}
