use std::convert::TryFrom;

const DEFAULT_NAME: &str = "FollowerRequestProcessor";

#[derive(Clone, Default)]
pub struct FollowerProcessorOptions {
    /// Name the stage logs and reports failures under.
    pub name: Option<String>,
    /// Maximum number of queued requests before producers wait. Unbounded if absent.
    pub queue_capacity: Option<usize>,
}

pub(super) struct FollowerProcessorOptionsValidated {
    pub name: String,
    pub queue_capacity: Option<usize>,
}

impl FollowerProcessorOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Processor name must not be blank");
        }
        if self.queue_capacity == Some(0) {
            return Err("Queue capacity must be greater than 0");
        }

        Ok(())
    }
}

impl TryFrom<FollowerProcessorOptions> for FollowerProcessorOptionsValidated {
    type Error = &'static str;

    fn try_from(options: FollowerProcessorOptions) -> Result<Self, Self::Error> {
        let values = FollowerProcessorOptionsValidated {
            name: options.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            queue_capacity: options.queue_capacity,
        };

        values.validate()?;
        Ok(values)
    }
}
