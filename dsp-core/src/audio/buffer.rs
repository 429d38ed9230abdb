//! Lock-free sample transport between the capture callback and the analyzer
//!
//! A visualization pipeline does not consume audio as a strict stream: on
//! every refresh tick it wants the freshest full frame and is happy to drop
//! whatever piled up in between. `FrameSource::read_latest_frame` implements
//! exactly that on top of an SPSC ring buffer.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// SPSC sample ring, split into a capture-side sink and an analysis-side source
pub struct SampleRing {
    producer: HeapProducer<f64>,
    consumer: HeapConsumer<f64>,
    capacity: usize,
}

impl SampleRing {
    /// Create a ring with the given capacity in samples
    ///
    /// The capacity should comfortably exceed one analysis frame, a few
    /// frames' worth leaves room for refresh jitter.
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<f64>::new(capacity);
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity,
        }
    }

    /// Split into the capture-side sink and the analysis-side source
    pub fn split(self) -> (SampleSink, FrameSource) {
        (
            SampleSink {
                producer: self.producer,
                capacity: self.capacity,
            },
            FrameSource {
                consumer: self.consumer,
                capacity: self.capacity,
            },
        )
    }

    /// Get ring capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Capture side: the audio callback pushes samples here
pub struct SampleSink {
    producer: HeapProducer<f64>,
    capacity: usize,
}

impl SampleSink {
    /// Write samples, returning how many fit
    ///
    /// When the ring is full the excess is dropped; the analysis side reads
    /// newest-wins, so stale samples are the right thing to lose.
    pub fn write(&mut self, samples: &[f64]) -> usize {
        self.producer.push_slice(samples)
    }

    /// Get number of free slots
    pub fn free_len(&self) -> usize {
        self.producer.free_len()
    }

    /// Get ring capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Analysis side: pulls frames for the spectrum pipeline
pub struct FrameSource {
    consumer: HeapConsumer<f64>,
    capacity: usize,
}

impl FrameSource {
    /// Read up to `buffer.len()` samples in stream order
    pub fn read(&mut self, buffer: &mut [f64]) -> usize {
        self.consumer.pop_slice(buffer)
    }

    /// Fill `frame` with the newest samples, discarding older ones
    ///
    /// Returns false (leaving `frame` untouched) when fewer than
    /// `frame.len()` samples are buffered.
    pub fn read_latest_frame(&mut self, frame: &mut [f64]) -> bool {
        let available = self.consumer.len();
        if available < frame.len() {
            return false;
        }

        self.consumer.skip(available - frame.len());
        let read = self.consumer.pop_slice(frame);
        debug_assert_eq!(read, frame.len());
        true
    }

    /// Get number of buffered samples
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    /// True if no samples are buffered
    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    /// Get ring capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
