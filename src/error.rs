//! Output errors.

/// A write to one of the motor controller lines failed.
///
/// Generic over the error types of the forward channel, the reverse channel
/// and the enable lines, which are usually different pin types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveError<F, R, E> {
    Forward(F),
    Reverse(R),
    Enable(E),
}
