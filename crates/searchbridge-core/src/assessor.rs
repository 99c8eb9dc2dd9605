use crate::transport::RawResponse;

/// Outcome of judging a raw response against an operation's success policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Success,
    /// A whitelisted failure the operation absorbs with a benign result,
    /// e.g. 404 on an existence probe.
    Ignorable,
    Hard,
}

/// Classifies responses for one operation. Any 2xx status is a success;
/// statuses in `ignored` are absorbed; everything else is a hard failure.
///
/// Stateless and freely shareable; operations declare their ignore tables as
/// consts next to the operation constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessAssessor {
    ignored: &'static [u16],
}

impl SuccessAssessor {
    pub const DEFAULT: SuccessAssessor = SuccessAssessor { ignored: &[] };

    pub const fn with_ignored(ignored: &'static [u16]) -> Self {
        Self { ignored }
    }

    pub const fn has_ignored(&self) -> bool {
        !self.ignored.is_empty()
    }

    pub fn assess(&self, response: &RawResponse) -> Assessment {
        if (200..300).contains(&response.status) {
            return Assessment::Success;
        }
        if self.ignored.contains(&response.status) {
            return Assessment::Ignorable;
        }
        Assessment::Hard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> RawResponse {
        RawResponse {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn any_2xx_is_success() {
        for status in [200, 201, 204, 299] {
            assert_eq!(
                SuccessAssessor::DEFAULT.assess(&response(status)),
                Assessment::Success
            );
        }
    }

    #[test]
    fn whitelisted_status_is_ignorable_others_are_hard() {
        let assessor = SuccessAssessor::with_ignored(&[404]);
        assert_eq!(assessor.assess(&response(404)), Assessment::Ignorable);
        assert_eq!(assessor.assess(&response(500)), Assessment::Hard);
        assert_eq!(assessor.assess(&response(403)), Assessment::Hard);
    }

    #[test]
    fn default_assessor_ignores_nothing() {
        assert!(!SuccessAssessor::DEFAULT.has_ignored());
        assert_eq!(
            SuccessAssessor::DEFAULT.assess(&response(404)),
            Assessment::Hard
        );
    }
}
