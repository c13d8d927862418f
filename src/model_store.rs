//! Persistence of a trained [`RandomForestClassifier`].
//!
//! The file is a versioned binary blob, all integers little-endian:
//! ```text
//! magic          b"SPFOREST"
//! version        u16
//! n_trees        u32
//! max_features   u32
//! max_depth      u32
//! min_leaf_size  u32
//! seed           u64
//! n_feature      u32
//! n_classes      u32
//! has_oob        u8, followed by oob_error f64 when 1
//! trees          n_trees times a pre-order node list:
//!     leaf   = 0u8, label u32, n_classes times count u64
//!     branch = 1u8, feature u32, threshold f64, left, right
//! ```
//! Floating point values are stored as their bit patterns,
//! so a loaded forest predicts exactly as the saved one.
//! `n_classes` must be `2` and `max_depth` at most
//! [`MAX_TREE_DEPTH`]; no tree may be deeper than `max_depth`.
use std::path::{Path, PathBuf};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use crate::{SpamError, N_CLASSES};
use crate::error::Result;
use crate::forest::{Hyperparameters, RandomForestClassifier};
use crate::tree::{DecisionTreeClassifier, Node, Splitter, MAX_TREE_DEPTH};


/// Leading bytes of every model file.
pub const MAGIC: &[u8; 8] = b"SPFOREST";
/// The format version written and read by this build.
pub const FORMAT_VERSION: u16 = 1;

const TAG_LEAF: u8 = 0;
const TAG_BRANCH: u8 = 1;


/// Write `forest` to `path`, replacing any existing file.
pub fn save<P: AsRef<Path>>(forest: &RandomForestClassifier, path: P)
    -> Result<()>
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SpamError::io(e, path))?;
    let mut writer = BufWriter::new(file);

    encode(forest, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| SpamError::io(e, path))
}


/// Read a forest written by [`save`].
///
/// Fails with [`SpamError::NotFound`] if `path` does not exist,
/// [`SpamError::VersionMismatch`] if it was written by another format
/// version, and [`SpamError::CorruptModel`] if it cannot be decoded.
pub fn load<P: AsRef<Path>>(path: P) -> Result<RandomForestClassifier> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SpamError::io(e, path))?;

    decode(BufReader::new(file), path)
}


/// Serialize `forest` into `writer`.
pub fn encode<W: Write>(forest: &RandomForestClassifier, writer: &mut W)
    -> io::Result<()>
{
    let hyper = forest.hyperparameters();

    writer.write_all(MAGIC)?;
    writer.write_all(&FORMAT_VERSION.to_le_bytes())?;

    write_u32(writer, forest.trees().len())?;
    write_u32(writer, hyper.max_features)?;
    write_u32(writer, hyper.max_depth)?;
    write_u32(writer, hyper.min_leaf_size)?;
    writer.write_all(&hyper.seed.to_le_bytes())?;
    write_u32(writer, forest.n_feature())?;
    write_u32(writer, forest.n_classes())?;

    match forest.oob_error() {
        Some(error) => {
            writer.write_all(&[1])?;
            writer.write_all(&error.to_bits().to_le_bytes())?;
        },
        None => writer.write_all(&[0])?,
    }

    for tree in forest.trees() {
        encode_node(tree.root(), forest.n_classes(), writer)?;
    }
    Ok(())
}


fn encode_node<W: Write>(node: &Node, n_classes: usize, writer: &mut W)
    -> io::Result<()>
{
    match node {
        Node::Leaf { label, distribution } => {
            writer.write_all(&[TAG_LEAF])?;
            write_u32(writer, *label)?;
            for k in 0..n_classes {
                let count = distribution.get(k).copied().unwrap_or(0);
                writer.write_all(&(count as u64).to_le_bytes())?;
            }
        },
        Node::Branch { splitter, left, right } => {
            writer.write_all(&[TAG_BRANCH])?;
            write_u32(writer, splitter.feature)?;
            writer.write_all(&splitter.threshold.to_bits().to_le_bytes())?;
            encode_node(left, n_classes, writer)?;
            encode_node(right, n_classes, writer)?;
        },
    }
    Ok(())
}


fn write_u32<W: Write>(writer: &mut W, value: usize) -> io::Result<()> {
    let value = u32::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{value} does not fit in the model format"),
        )
    })?;
    writer.write_all(&value.to_le_bytes())
}


/// Deserialize a forest from `reader`.
/// `path` is only used in error messages.
pub fn decode<R: Read, P: AsRef<Path>>(reader: R, path: P)
    -> Result<RandomForestClassifier>
{
    let mut reader = ModelReader::new(reader, path.as_ref());

    let magic = reader.bytes::<8>()?;
    if &magic != MAGIC {
        return Err(reader.corrupt("not a spamforest model file"));
    }
    let version = u16::from_le_bytes(reader.bytes::<2>()?);
    if version != FORMAT_VERSION {
        return Err(SpamError::VersionMismatch {
            path: reader.path,
            expected: FORMAT_VERSION,
            found: version,
        });
    }

    let n_trees = reader.u32()?;
    let max_features = reader.u32()?;
    let max_depth = reader.u32()?;
    let min_leaf_size = reader.u32()?;
    let seed = reader.u64()?;
    let n_feature = reader.u32()?;
    let n_classes = reader.u32()?;
    let oob_error = match reader.u8()? {
        0 => None,
        1 => Some(reader.f64()?),
        flag => {
            return Err(reader.corrupt(format!("invalid OOB flag {flag}")));
        },
    };
    if n_classes != N_CLASSES {
        return Err(reader.corrupt(format!(
            "expected {N_CLASSES} classes, found {n_classes}"
        )));
    }
    // Bounds the recursion of `ModelReader::node`.
    if max_depth > MAX_TREE_DEPTH {
        return Err(reader.corrupt(format!(
            "max_depth {max_depth} exceeds the limit of {MAX_TREE_DEPTH}"
        )));
    }

    let hyper = Hyperparameters {
        n_trees,
        max_features,
        max_depth,
        min_leaf_size,
        seed,
    };
    let shape = Shape { n_feature, n_classes, max_depth };

    let trees = (0..n_trees)
        .map(|_| {
            let root = reader.node(&shape, 0)?;
            Ok(DecisionTreeClassifier::from_root(root, n_feature))
        })
        .collect::<Result<Vec<_>>>()?;

    if !reader.at_end()? {
        return Err(reader.corrupt("trailing bytes after the last tree"));
    }

    Ok(RandomForestClassifier::from_parts(
        hyper, trees, n_feature, n_classes, oob_error,
    ))
}


/// Bounds that every decoded node must respect.
struct Shape {
    n_feature: usize,
    n_classes: usize,
    max_depth: usize,
}


/// Reads the primitives of the model format,
/// turning truncation into [`SpamError::CorruptModel`].
struct ModelReader<R> {
    inner: R,
    path: PathBuf,
}


impl<R: Read> ModelReader<R> {
    fn new(inner: R, path: &Path) -> Self {
        Self { inner, path: path.to_path_buf() }
    }


    fn corrupt<S: ToString>(&self, reason: S) -> SpamError {
        SpamError::CorruptModel {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }


    fn bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0_u8; N];
        match self.inner.read_exact(&mut buf) {
            Ok(()) => Ok(buf),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(self.corrupt("unexpected end of file"))
            },
            Err(e) => Err(SpamError::io(e, &self.path)),
        }
    }


    fn u8(&mut self) -> Result<u8> {
        Ok(self.bytes::<1>()?[0])
    }


    fn u32(&mut self) -> Result<usize> {
        Ok(u32::from_le_bytes(self.bytes::<4>()?) as usize)
    }


    fn u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.bytes::<8>()?))
    }


    fn f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.u64()?))
    }


    fn at_end(&mut self) -> Result<bool> {
        let mut buf = [0_u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(n) => return Ok(n == 0),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SpamError::io(e, &self.path)),
            }
        }
    }


    fn node(&mut self, shape: &Shape, depth: usize) -> Result<Node> {
        match self.u8()? {
            TAG_LEAF => {
                let label = self.u32()?;
                if label >= shape.n_classes {
                    return Err(self.corrupt(format!(
                        "leaf label {label} out of range (n_classes = {})",
                        shape.n_classes
                    )));
                }
                let distribution = (0..shape.n_classes)
                    .map(|_| self.u64().map(|c| c as usize))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Node::leaf(label, distribution))
            },
            TAG_BRANCH => {
                if depth >= shape.max_depth {
                    return Err(self.corrupt("tree deeper than max_depth"));
                }
                let feature = self.u32()?;
                if feature >= shape.n_feature {
                    return Err(self.corrupt(format!(
                        "split feature {feature} out of range (n_feature = {})",
                        shape.n_feature
                    )));
                }
                let threshold = self.f64()?;
                let left = self.node(shape, depth + 1)?;
                let right = self.node(shape, depth + 1)?;
                Ok(Node::branch(
                    Splitter::new(feature, threshold),
                    Box::new(left),
                    Box::new(right),
                ))
            },
            tag => Err(self.corrupt(format!("unknown node tag {tag}"))),
        }
    }
}


impl RandomForestClassifier {
    /// Write `self` to `path`. See [`save`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save(self, path)
    }


    /// Read a forest from `path`. See [`load`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load(path)
    }
}
