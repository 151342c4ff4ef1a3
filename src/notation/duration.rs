/// A length of time as an exact fraction of a whole note.
///
/// `C4/8.` is 3/16, `_/12` is 1/12. Sums stay exact, so a beat cursor built
/// from these never drifts however long the voice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    pub numerator: u64,
    /// Whole-note divisions: 4 for a quarter, 12 for a triplet eighth
    pub denominator: u64,
}

impl Duration {
    /// No time at all; the starting point of every beat cursor.
    pub const ZERO: Duration = Duration {
        numerator: 0,
        denominator: 1,
    };

    pub const WHOLE: Duration = Duration {
        numerator: 1,
        denominator: 1,
    };
    pub const HALF: Duration = Duration {
        numerator: 1,
        denominator: 2,
    };
    pub const QUARTER: Duration = Duration {
        numerator: 1,
        denominator: 4,
    };
    pub const EIGHTH: Duration = Duration {
        numerator: 1,
        denominator: 8,
    };
    pub const SIXTEENTH: Duration = Duration {
        numerator: 1,
        denominator: 16,
    };

    pub const DOTTED_QUARTER: Duration = Duration::QUARTER.dotted();
    pub const DOTTED_EIGHTH: Duration = Duration::EIGHTH.dotted();

    /// The note value written as `/denominator` in notation: 1/denominator of a whole note.
    /// Returns None for a zero denominator.
    pub const fn from_denominator(denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        Some(Duration {
            numerator: 1,
            denominator,
        })
    }

    /// Dotted value, half as long again (3/2). Panics on overflow in const
    /// contexts; use [`Duration::checked_dotted`] for parsed input.
    pub const fn dotted(self) -> Self {
        Duration {
            numerator: self.numerator * 3,
            denominator: self.denominator * 2,
        }
        .reduce()
    }

    /// Like [`Duration::dotted`], but None instead of overflowing.
    pub const fn checked_dotted(self) -> Option<Self> {
        match (self.numerator.checked_mul(3), self.denominator.checked_mul(2)) {
            (Some(numerator), Some(denominator)) => Some(
                Duration {
                    numerator,
                    denominator,
                }
                .reduce(),
            ),
            _ => None,
        }
    }

    /// Lowest terms, so equal lengths compare equal.
    pub const fn reduce(self) -> Self {
        match gcd(self.numerator, self.denominator) {
            0 => self,
            divisor => Duration {
                numerator: self.numerator / divisor,
                denominator: self.denominator / divisor,
            },
        }
    }

    /// Length in beats (quarter notes).
    pub fn beats(&self) -> f64 {
        4.0 * self.numerator as f64 / self.denominator as f64
    }

    /// Add two durations over their least common denominator.
    /// Returns None if the exact sum does not fit.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let lcm = (self.denominator / gcd(self.denominator, other.denominator))
            .checked_mul(other.denominator)?;
        let left = self.numerator.checked_mul(lcm / self.denominator)?;
        let right = other.numerator.checked_mul(lcm / other.denominator)?;
        Some(
            Duration {
                numerator: left.checked_add(right)?,
                denominator: lcm,
            }
            .reduce(),
        )
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::ZERO
    }
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}
