use std::fmt;
use std::time::Duration;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// A duration broken down into days, hours, minutes, seconds and milliseconds.
///
/// Bot commands use this to report uptimes, cooldowns and ban lengths. The
/// [`Display`](fmt::Display) form lists every non-zero unit from days down to
/// seconds, e.g. `1 day 3 hours 1 second`. Units are separated by single
/// spaces, with no leading or trailing space. Milliseconds are carried but
/// never rendered, so a sub-second duration formats as an empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Time {
	pub days: u64,
	pub hours: u64,
	pub minutes: u64,
	pub seconds: u64,
	pub millis: u64,
}

impl Time {
	/// Splits `duration` into its calendar-free components.
	pub fn from_duration(duration: Duration) -> Self {
		let mut secs = duration.as_secs();
		let days = secs / SECS_PER_DAY;
		secs %= SECS_PER_DAY;
		let hours = secs / SECS_PER_HOUR;
		secs %= SECS_PER_HOUR;
		let minutes = secs / SECS_PER_MINUTE;
		Self {
			days,
			hours,
			minutes,
			seconds: secs % SECS_PER_MINUTE,
			millis: u64::from(duration.subsec_millis()),
		}
	}

	/// Reassembles the components into a [`Duration`].
	///
	/// Returns `None` if the fields, which are public and may be set freely,
	/// add up to more than a `Duration` can hold.
	pub fn to_duration(self) -> Option<Duration> {
		let secs = self
			.days
			.checked_mul(SECS_PER_DAY)?
			.checked_add(self.hours.checked_mul(SECS_PER_HOUR)?)?
			.checked_add(self.minutes.checked_mul(SECS_PER_MINUTE)?)?
			.checked_add(self.seconds)?;
		Duration::from_secs(secs).checked_add(Duration::from_millis(self.millis))
	}

	/// Returns true if no unit rendered by `Display` is non-zero.
	pub fn is_sub_second(&self) -> bool {
		self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
	}
}

impl From<Duration> for Time {
	fn from(duration: Duration) -> Self {
		Self::from_duration(duration)
	}
}

impl fmt::Display for Time {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let units = [
			(self.days, "day"),
			(self.hours, "hour"),
			(self.minutes, "minute"),
			(self.seconds, "second"),
		];
		let mut first = true;
		for (count, unit) in units {
			if count == 0 {
				continue;
			}
			if !first {
				f.write_str(" ")?;
			}
			first = false;
			let plural = if count > 1 { "s" } else { "" };
			write!(f, "{count} {unit}{plural}")?;
		}
		Ok(())
	}
}
