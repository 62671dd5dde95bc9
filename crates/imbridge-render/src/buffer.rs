//! Transient buffer helpers over the graphics service.

use imbridge_core::{GraphicsService, Stream, Usage};

use crate::error::RenderResult;

fn stride_of<T>() -> u32 {
    u32::try_from(std::mem::size_of::<T>()).unwrap_or(u32::MAX)
}

/// Allocates a transient buffer holding `count` values of `T`.
pub fn allocate<T: bytemuck::Pod>(
    graphics: &mut dyn GraphicsService,
    usage: Usage,
    count: usize,
) -> RenderResult<Stream> {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    Ok(graphics.allocate(usage, stride_of::<T>(), count)?)
}

/// Writes `data` into a stream starting at element `first`.
pub fn write<T: bytemuck::Pod>(
    graphics: &mut dyn GraphicsService,
    stream: &Stream,
    first: usize,
    data: &[T],
) -> RenderResult<()> {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    let start = first * std::mem::size_of::<T>();
    let target = graphics.stream_mut(stream)?;
    target[start..start + bytes.len()].copy_from_slice(bytes);
    Ok(())
}

/// Allocates a transient buffer and fills it with `data`.
pub fn upload<T: bytemuck::Pod>(
    graphics: &mut dyn GraphicsService,
    usage: Usage,
    data: &[T],
) -> RenderResult<Stream> {
    let stream = allocate::<T>(graphics, usage, data.len())?;
    write(graphics, &stream, 0, data)?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imbridge_core::testing::RecordingGraphics;

    #[test]
    fn test_upload_copies_bytes() {
        let mut graphics = RecordingGraphics::new();
        let stream = upload(&mut graphics, Usage::Index, &[1u16, 2, 3]).unwrap();
        assert_eq!(stream.stride, 2);
        assert_eq!(stream.count, 3);
        assert_eq!(graphics.stream_bytes(&stream).unwrap(), bytemuck::cast_slice::<u16, u8>(&[1, 2, 3]));
    }

    #[test]
    fn test_write_at_offset() {
        let mut graphics = RecordingGraphics::new();
        let stream = allocate::<u32>(&mut graphics, Usage::Vertex, 4).unwrap();
        write(&mut graphics, &stream, 2, &[7u32, 8]).unwrap();
        let values: Vec<u32> = graphics
            .stream_bytes(&stream)
            .unwrap()
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(values, vec![0, 0, 7, 8]);
    }

    #[test]
    fn test_allocation_failure_propagates() {
        let mut graphics = RecordingGraphics::new();
        graphics.fail_next_allocation = true;
        assert!(allocate::<u32>(&mut graphics, Usage::Vertex, 4).is_err());
        assert!(allocate::<u32>(&mut graphics, Usage::Vertex, 4).is_ok());
    }
}
