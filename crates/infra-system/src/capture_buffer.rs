// Growable capture buffer
// Starts at a fixed capacity and doubles whenever a read fills it

use std::collections::TryReserveError;
use std::io::{ErrorKind, Read};
use textbridge_core::port::AllocStage;
use tracing::{trace, warn};

/// Read `reader` to end-of-stream into a doubling buffer
///
/// Every reservation is fallible; an allocation failure abandons the read
/// and reports which stage failed. The buffer is released on every path.
/// `Interrupted` reads are retried, any other read error ends the stream.
///
/// # Arguments
/// * `reader` - Stream to drain (child stdout in production)
/// * `initial_capacity` - First buffer size in bytes (at least 1)
///
/// # Example
/// ```
/// use textbridge_infra_system::capture_buffer::read_to_end_doubling;
///
/// let data = vec![b'x'; 10_000];
/// let captured = read_to_end_doubling(&mut data.as_slice(), 4096).unwrap();
/// assert_eq!(captured, data);
/// ```
pub fn read_to_end_doubling<R: Read + ?Sized>(
    reader: &mut R,
    initial_capacity: usize,
) -> Result<Vec<u8>, AllocStage> {
    read_to_end_doubling_with(reader, initial_capacity, try_reserve_exact)
}

/// Buffer reservation: make room for `additional` more bytes in `buf`
pub type Reserve = fn(&mut Vec<u8>, usize) -> Result<(), TryReserveError>;

/// Default reservation, straight to the allocator
pub fn try_reserve_exact(buf: &mut Vec<u8>, additional: usize) -> Result<(), TryReserveError> {
    buf.try_reserve_exact(additional)
}

/// `read_to_end_doubling` with every reservation routed through `reserve`
///
/// The first call reserves the initial buffer, later calls grow it.
pub fn read_to_end_doubling_with<R, F>(
    reader: &mut R,
    initial_capacity: usize,
    mut reserve: F,
) -> Result<Vec<u8>, AllocStage>
where
    R: Read + ?Sized,
    F: FnMut(&mut Vec<u8>, usize) -> Result<(), TryReserveError>,
{
    let mut capacity = initial_capacity.max(1);
    let mut buf: Vec<u8> = Vec::new();
    reserve(&mut buf, capacity).map_err(|_| AllocStage::Initial)?;
    buf.resize(capacity, 0);

    let mut length = 0;
    loop {
        match reader.read(&mut buf[length..]) {
            Ok(0) => break,
            Ok(n) => {
                length += n;
                if length == capacity {
                    let grown = capacity.checked_mul(2).ok_or(AllocStage::Growth)?;
                    reserve(&mut buf, grown - capacity).map_err(|_| AllocStage::Growth)?;
                    buf.resize(grown, 0);
                    trace!(from = capacity, to = grown, "Capture buffer grown");
                    capacity = grown;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(error = %e, captured = length, "Read failed, treating as end of stream");
                break;
            }
        }
    }

    buf.truncate(length);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Reader that hands out at most `chunk` bytes per call
    struct Chunked<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Chunked<'_> {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(out.len()).min(self.data.len());
            out[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Reader that fails once with the given kind, then yields `data`
    struct FailOnce {
        kind: Option<ErrorKind>,
        data: &'static [u8],
    }

    impl Read for FailOnce {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if let Some(kind) = self.kind.take() {
                return Err(io::Error::new(kind, "injected"));
            }
            let n = out.len().min(self.data.len());
            out[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_empty_stream() {
        let captured = read_to_end_doubling(&mut io::empty(), 4096).unwrap();
        assert!(captured.is_empty());
    }

    #[test]
    fn test_exact_capacity_boundary() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
        let captured = read_to_end_doubling(&mut data.as_slice(), 4096).unwrap();
        assert_eq!(captured, data);
    }

    #[test]
    fn test_multiple_doublings_with_small_reads() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 97) as u8).collect();
        let mut reader = Chunked {
            data: &data,
            chunk: 333,
        };
        let captured = read_to_end_doubling(&mut reader, 16).unwrap();
        assert_eq!(captured, data);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let captured = read_to_end_doubling(&mut &b"abc"[..], 0).unwrap();
        assert_eq!(captured, b"abc");
    }

    #[test]
    fn test_interrupted_is_retried() {
        let mut reader = FailOnce {
            kind: Some(ErrorKind::Interrupted),
            data: b"after",
        };
        assert_eq!(read_to_end_doubling(&mut reader, 8).unwrap(), b"after");
    }

    #[test]
    fn test_other_error_ends_stream() {
        let mut reader = FailOnce {
            kind: Some(ErrorKind::BrokenPipe),
            data: b"never read",
        };
        assert!(read_to_end_doubling(&mut reader, 8).unwrap().is_empty());
    }

    fn reserve_error() -> TryReserveError {
        Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err()
    }

    #[test]
    fn test_growth_allocation_failure_abandons_read() {
        let data = vec![b'x'; 100];
        let mut calls = 0;
        let result = read_to_end_doubling_with(&mut data.as_slice(), 8, |buf, additional| {
            calls += 1;
            if calls == 1 {
                buf.try_reserve_exact(additional)
            } else {
                Err(reserve_error())
            }
        });

        assert_eq!(result, Err(AllocStage::Growth));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_growth_not_requested_below_capacity() {
        let mut calls = 0;
        let result = read_to_end_doubling_with(&mut &b"short"[..], 8, |buf, additional| {
            calls += 1;
            if calls == 1 {
                buf.try_reserve_exact(additional)
            } else {
                Err(reserve_error())
            }
        });

        assert_eq!(result.unwrap(), b"short");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_growth_requests_double() {
        let data = vec![b'y'; 20];
        let mut requests = Vec::new();
        let captured = read_to_end_doubling_with(&mut data.as_slice(), 4, |buf, additional| {
            requests.push(additional);
            buf.try_reserve_exact(additional)
        })
        .unwrap();

        assert_eq!(captured, data);
        // 4 initial, then +4 -> 8, +8 -> 16, +16 -> 32
        assert_eq!(requests, vec![4, 4, 8, 16]);
    }

    #[test]
    fn test_initial_allocation_failure() {
        let result = read_to_end_doubling(&mut io::empty(), usize::MAX);
        assert_eq!(result, Err(AllocStage::Initial));
    }
}
