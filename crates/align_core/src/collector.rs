use crate::types::Alignment;
use crate::traits::Scalar;

/// Accumulates verified portals, widened by the leniency window, in tick order.
#[derive(Debug, Clone)]
pub struct AlignmentCollector<T: Scalar> {
    leniency: T,
    cap: usize,
    alignments: Vec<Alignment>,
    truncated: bool,
}

impl<T: Scalar> AlignmentCollector<T> {
    pub fn new(leniency: T, cap: usize) -> Self {
        Self {
            leniency,
            cap,
            alignments: Vec::new(),
            truncated: false,
        }
    }

    /// Appends an alignment for `ticks`. Returns `false`, and marks the
    /// collection truncated, once the cap is reached.
    ///
    /// Ticks must be offered in increasing order.
    pub fn offer(&mut self, ticks: usize, portal: T) -> bool {
        if self.alignments.len() >= self.cap {
            self.truncated = true;
            return false;
        }
        debug_assert!(self
            .alignments
            .last()
            .map_or(true, |last| last.ticks_since_portal < ticks));

        let zero = T::zero();
        let portal = if portal == zero { zero } else { portal };
        let low = portal - self.leniency;
        let portal_min = if low > zero { low } else { zero };
        let portal_max = portal + self.leniency;

        self.alignments.push(Alignment {
            ticks_since_portal: ticks,
            portal: portal.widen(),
            portal_min: portal_min.widen(),
            portal_max: portal_max.widen(),
        });
        true
    }

    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }

    pub fn into_alignments(self) -> Vec<Alignment> {
        self.alignments
    }
}
