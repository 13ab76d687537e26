//! Frame serializer
//!
//! Pushes a whole framebuffer to the chain: eight frames, one per digit
//! plane, each carrying one digit command per module in the order the chain
//! is wired. Planes go out strictly in order and each frame is closed
//! before the next one opens, so every chip latches plane `i` before any
//! chip sees plane `i + 1`.

use segchain_core::buffer::PixelBuffer;
use segchain_core::protocol::{ChainLayout, ChainOrder, FramePlan};
use segchain_hal::transport::Transport;

use super::channel::CommandChannel;
use super::Error;

/// Streams framebuffers to the chain using a wiring order policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSerializer<O = ChainLayout> {
    order: O,
}

impl<O: ChainOrder> FrameSerializer<O> {
    /// Create a serializer for a wiring order
    pub const fn new(order: O) -> Self {
        Self { order }
    }

    /// The wiring order in use
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Send every digit plane of `buffer`
    ///
    /// A transport error aborts the refresh after closing the current
    /// frame; planes already sent stay latched. An order that is not a
    /// permutation of the chain fails with [`Error::InvalidOrder`].
    pub fn update<T: Transport>(
        &self,
        channel: &mut CommandChannel<T>,
        buffer: &PixelBuffer,
    ) -> Result<(), Error<T::Error>> {
        channel.ensure_ready()?;
        if buffer.module_count() != channel.modules() {
            return Err(Error::ChainMismatch);
        }

        // Checked before any frame opens, so a bad order sends nothing
        let plan = FramePlan::new(buffer, &self.order).map_err(|_| Error::InvalidOrder)?;

        for plane in plan.planes() {
            channel.frame(|writer| {
                for command in plane {
                    writer.send(command)?;
                }
                Ok(())
            })?;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("refreshed {} modules", buffer.module_count());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use segchain_hal::mock::{MockError, MockTransport};
    use segchain_hal::spi::SpiConfig;

    fn ready_channel(modules: usize) -> CommandChannel<MockTransport> {
        let mut channel = CommandChannel::new(MockTransport::new(), SpiConfig::MAX7219, modules);
        channel.init().unwrap();
        channel
    }

    /// Buffer whose module `m` holds `m` in every digit
    fn module_tagged(columns: u8, rows: u8) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(columns, rows).unwrap();
        for (i, byte) in buffer.as_bytes_mut().iter_mut().enumerate() {
            *byte = (i / 8) as u8;
        }
        buffer
    }

    #[test]
    fn test_eight_frames_in_plane_order() {
        let mut channel = ready_channel(3);
        let buffer = module_tagged(3, 1);
        let serializer = FrameSerializer::new(ChainLayout::Natural);

        serializer.update(&mut channel, &buffer).unwrap();

        let frames = &channel.transport().frames()[5..];
        assert_eq!(frames.len(), 8);
        for (plane, frame) in frames.iter().enumerate() {
            assert_eq!(frame.command_count(), 3);
            assert!(frame.commands().all(|(addr, _)| addr as usize == plane + 1));
        }
    }

    #[test]
    fn test_reference_order_single_group() {
        let mut channel = ready_channel(10);
        let buffer = module_tagged(10, 1);
        let serializer = FrameSerializer::new(ChainLayout::REFERENCE);

        serializer.update(&mut channel, &buffer).unwrap();

        let frame = &channel.transport().frames()[5];
        let modules: Vec<u8> = frame.commands().map(|(_, value)| value).collect();
        assert_eq!(modules, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_reference_order_two_groups() {
        let mut channel = ready_channel(20);
        let buffer = module_tagged(10, 2);
        let serializer = FrameSerializer::new(ChainLayout::REFERENCE);

        serializer.update(&mut channel, &buffer).unwrap();

        for frame in &channel.transport().frames()[5..] {
            let modules: Vec<u8> = frame.commands().map(|(_, value)| value).collect();
            let expected: Vec<u8> = (10..20).rev().chain(0..10).collect();
            assert_eq!(modules, expected);
        }
    }

    #[test]
    fn test_digit_bytes_per_plane() {
        let mut channel = ready_channel(1);
        let mut buffer = PixelBuffer::new(1, 1).unwrap();
        for (i, byte) in buffer.as_bytes_mut().iter_mut().enumerate() {
            *byte = 0x10 + i as u8;
        }

        FrameSerializer::new(ChainLayout::REFERENCE)
            .update(&mut channel, &buffer)
            .unwrap();

        let sent: Vec<(u8, u8)> = channel.transport().frames()[5..]
            .iter()
            .flat_map(|f| f.commands())
            .collect();
        let expected: Vec<(u8, u8)> = (0..8).map(|i| (i + 1, 0x10 + i)).collect();
        assert_eq!(sent, expected);
    }

    #[test]
    fn test_requires_init() {
        let mut channel = CommandChannel::new(MockTransport::new(), SpiConfig::MAX7219, 1);
        let buffer = PixelBuffer::new(1, 1).unwrap();

        assert_eq!(
            FrameSerializer::<ChainLayout>::default().update(&mut channel, &buffer),
            Err(Error::NotInitialized)
        );
    }

    #[test]
    fn test_chain_mismatch() {
        let mut channel = ready_channel(2);
        let buffer = PixelBuffer::new(1, 1).unwrap();

        assert_eq!(
            FrameSerializer::new(ChainLayout::Natural).update(&mut channel, &buffer),
            Err(Error::ChainMismatch)
        );
    }

    #[test]
    fn test_bus_error_mid_sweep_releases_bus() {
        // Init takes 5 x 2 writes; fail during the second plane
        let transport = MockTransport::new().fail_after(10 + 2 + 1);
        let mut channel = CommandChannel::new(transport, SpiConfig::MAX7219, 2);
        channel.init().unwrap();
        let buffer = PixelBuffer::new(2, 1).unwrap();

        let result = FrameSerializer::new(ChainLayout::Natural).update(&mut channel, &buffer);

        assert_eq!(result, Err(Error::Bus(MockError::Injected)));
        assert!(!channel.transport().is_selected());
        // Init frames, the full first plane, the aborted second plane
        assert_eq!(channel.transport().frames().len(), 5 + 2);
    }

    #[test]
    fn test_order_outside_chain_sends_nothing() {
        let mut channel = ready_channel(2);
        let buffer = module_tagged(2, 1);
        let shifted = |slot: usize, _modules: usize| slot + 1;

        assert_eq!(
            FrameSerializer::new(shifted).update(&mut channel, &buffer),
            Err(Error::InvalidOrder)
        );
        assert_eq!(channel.transport().frames().len(), 5);
        assert!(!channel.transport().is_selected());
    }

    #[test]
    fn test_closure_order() {
        let mut channel = ready_channel(4);
        let buffer = module_tagged(4, 1);
        let rotate = |slot: usize, modules: usize| (slot + 1) % modules;

        FrameSerializer::new(rotate)
            .update(&mut channel, &buffer)
            .unwrap();

        let frame = &channel.transport().frames()[5];
        let modules: Vec<u8> = frame.commands().map(|(_, value)| value).collect();
        assert_eq!(modules, vec![1, 2, 3, 0]);
    }

    proptest! {
        #[test]
        fn prop_every_module_sent_once_per_plane(columns in 1u8..=8, rows in 1u8..=4) {
            let modules = usize::from(columns) * usize::from(rows);
            let mut channel = ready_channel(modules);
            let buffer = module_tagged(columns, rows);

            FrameSerializer::new(ChainLayout::REFERENCE)
                .update(&mut channel, &buffer)
                .unwrap();

            let expected: Vec<u8> = (0..modules as u8).collect();
            for frame in &channel.transport().frames()[5..] {
                let mut sent: Vec<u8> = frame.commands().map(|(_, value)| value).collect();
                sent.sort_unstable();
                prop_assert_eq!(sent, expected.clone());
            }
        }
    }
}
