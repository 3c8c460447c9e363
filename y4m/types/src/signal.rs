/*!
    Stream termination signals.
*/

/**
    Normal ways for a frame stream to stop producing frames.

    Neither is an error. Callers should stop pulling without reporting a
    failure when they see one.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamSignal {
    /**
        End of stream: the input holds no more frame records.

        Pulling again yields the same signal.
    */
    EndOfStream,
    /**
        Cancelled: the source was closed.

        Pulling again yields the same signal without waiting.
    */
    Cancelled,
}
