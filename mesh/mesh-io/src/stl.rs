//! Binary STL (Stereolithography) support.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (fixed text, space padded)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (always 0 on write)
//! end
//! ```
//!
//! All values are little-endian. Coordinates are millimeters by convention;
//! the format carries no unit metadata.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use mesh_types::{Facet, Point3, Triangle, TriangleSoup, Vector3};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of the little-endian triangle count following the header.
const COUNT_SIZE: usize = 4;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// Text placed at the start of every header we write.
const HEADER_TEXT: &[u8] = b"Binary STL generated by labelforge mesh-io";

/// Exact byte length of a binary STL holding `triangles` facets.
///
/// # Example
///
/// ```
/// assert_eq!(mesh_io::encoded_len(0), 84);
/// assert_eq!(mesh_io::encoded_len(2), 184);
/// ```
#[must_use]
pub const fn encoded_len(triangles: usize) -> usize {
    HEADER_SIZE + COUNT_SIZE + triangles * TRIANGLE_SIZE
}

/// Write a soup as binary STL to any writer.
///
/// Output depends only on the soup, so equal soups give equal bytes. An
/// empty soup produces a valid 84-byte file declaring zero triangles.
///
/// # Errors
///
/// Returns an error if the writer fails or the soup holds more than
/// `u32::MAX` triangles.
pub fn write_stl<W: Write>(soup: &TriangleSoup, mut writer: W) -> IoResult<()> {
    let face_count = u32::try_from(soup.len())
        .map_err(|_| IoError::TooManyTriangles { count: soup.len() })?;

    // Write 80-byte header (padded with spaces)
    let mut header = [b' '; HEADER_SIZE];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;

    writer.write_all(&face_count.to_le_bytes())?;

    for facet in soup {
        let n = facet.normal;
        write_vec3(&mut writer, n.x, n.y, n.z)?;
        for v in &facet.triangle.vertices() {
            write_vec3(&mut writer, v.x, v.y, v.z)?;
        }
        // Attribute byte count
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Encode a soup into an in-memory binary STL buffer.
///
/// # Errors
///
/// Returns an error only if the soup holds more than `u32::MAX` triangles.
///
/// # Example
///
/// ```
/// use mesh_io::{decode_stl, encode_stl};
/// use mesh_types::{cuboid, Point3};
///
/// let soup = cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
/// let bytes = encode_stl(&soup).unwrap();
/// assert_eq!(bytes.len(), 84 + 12 * 50);
/// assert_eq!(decode_stl(&bytes).unwrap().len(), 12);
/// ```
pub fn encode_stl(soup: &TriangleSoup) -> IoResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(encoded_len(soup.len()));
    write_stl(soup, &mut buf)?;
    debug!(triangles = soup.len(), bytes = buf.len(), "encoded binary STL");
    Ok(buf)
}

/// Parse a binary STL buffer.
///
/// Normals are taken from the file as stored. Bytes beyond the declared
/// triangles are ignored.
///
/// # Errors
///
/// Returns an error if the buffer is shorter than the header plus count, or
/// shorter than the declared number of triangles requires.
pub fn decode_stl(bytes: &[u8]) -> IoResult<TriangleSoup> {
    if bytes.len() < HEADER_SIZE + COUNT_SIZE {
        return Err(IoError::InvalidHeader {
            expected: HEADER_SIZE + COUNT_SIZE,
            got: bytes.len(),
        });
    }

    // Face count is stored after the 80-byte header
    let face_count = u32::from_le_bytes([
        bytes[HEADER_SIZE],
        bytes[HEADER_SIZE + 1],
        bytes[HEADER_SIZE + 2],
        bytes[HEADER_SIZE + 3],
    ]);

    let body = &bytes[HEADER_SIZE + COUNT_SIZE..];
    let available = body.len() / TRIANGLE_SIZE;
    let declared = face_count as usize;
    if available < declared {
        return Err(IoError::InvalidFaceCount {
            expected: face_count,
            got: u32::try_from(available).unwrap_or(u32::MAX),
        });
    }

    if body.len() > declared * TRIANGLE_SIZE {
        debug!(
            extra_bytes = body.len() - declared * TRIANGLE_SIZE,
            "ignoring trailing bytes after declared triangles"
        );
    }

    let facets: TriangleSoup = body
        .chunks_exact(TRIANGLE_SIZE)
        .take(declared)
        .map(|chunk| {
            let normal = read_vec3(&chunk[0..12]);
            let triangle = Triangle::new(
                Point3::from(read_vec3(&chunk[12..24])),
                Point3::from(read_vec3(&chunk[24..36])),
                Point3::from(read_vec3(&chunk[36..48])),
            );
            Facet::from_raw(normal, triangle)
        })
        .collect();

    Ok(facets)
}

/// Save a soup to a binary STL file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::save_stl;
/// use mesh_types::{cuboid, Point3};
///
/// let soup = cuboid(Point3::origin(), Point3::new(45.0, 15.0, 1.6));
/// save_stl(&soup, "plate.stl").unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(soup: &TriangleSoup, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_stl(soup, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Load a binary STL file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or malformed.
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<TriangleSoup> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    decode_stl(&bytes)
}

/// Read three little-endian f32s.
fn read_vec3(buf: &[u8]) -> Vector3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vector3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Write three values as little-endian f32s.
fn write_vec3<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional for STL format
    {
        writer.write_all(&(x as f32).to_le_bytes())?;
        writer.write_all(&(y as f32).to_le_bytes())?;
        writer.write_all(&(z as f32).to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{MeshBounds, cuboid};

    fn test_box() -> TriangleSoup {
        cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(36.0, 12.0, 1.6))
    }

    #[test]
    fn empty_soup_is_valid_buffer() {
        let bytes = encode_stl(&TriangleSoup::new()).unwrap();
        assert_eq!(bytes.len(), 84);
        assert_eq!(&bytes[80..84], &[0, 0, 0, 0]);
        assert!(decode_stl(&bytes).unwrap().is_empty());
    }

    #[test]
    fn layout_matches_format() {
        let soup = test_box();
        let bytes = encode_stl(&soup).unwrap();
        assert_eq!(bytes.len(), encoded_len(12));
        assert!(bytes.starts_with(b"Binary STL"));
        assert_eq!(u32::from_le_bytes(bytes[80..84].try_into().unwrap()), 12);

        // First facet: normal then three vertices then a zero attribute.
        let first = &bytes[84..134];
        let n = soup.facets()[0].normal;
        assert_eq!(f32::from_le_bytes(first[8..12].try_into().unwrap()), n.z as f32);
        assert_eq!(&first[48..50], &[0, 0]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = encode_stl(&test_box()).unwrap();
        let b = encode_stl(&test_box()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn decode_preserves_geometry() {
        let soup = test_box();
        let decoded = decode_stl(&encode_stl(&soup).unwrap()).unwrap();
        assert_eq!(decoded.len(), soup.len());
        let b = decoded.bounds();
        assert_relative_eq!(b.width(), 36.0, epsilon = 1e-5);
        assert_relative_eq!(b.height(), 12.0, epsilon = 1e-5);
        assert_relative_eq!(b.depth(), 1.6, epsilon = 1e-5);
    }

    #[test]
    fn short_header_is_rejected() {
        let err = decode_stl(&[0u8; 40]).unwrap_err();
        assert!(matches!(err, IoError::InvalidHeader { expected: 84, got: 40 }));
    }

    #[test]
    fn truncated_body_is_rejected() {
        let mut bytes = encode_stl(&test_box()).unwrap();
        bytes.truncate(bytes.len() - 10);
        let err = decode_stl(&bytes).unwrap_err();
        assert!(matches!(
            err,
            IoError::InvalidFaceCount {
                expected: 12,
                got: 11
            }
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = encode_stl(&test_box()).unwrap();
        bytes.extend_from_slice(&[0xAB; 7]);
        assert_eq!(decode_stl(&bytes).unwrap().len(), 12);
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_stl("nonexistent_file_12345.stl");
        if let Err(IoError::FileNotFound { path }) = result {
            assert!(path.to_string_lossy().contains("nonexistent"));
        } else {
            panic!("expected FileNotFound");
        }
    }
}
