/// Marker for a field the source image did not supply.
///
/// Presentation code filters on this exact string, so records never carry empty
/// or missing fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// The closed set of generation parameters every dialect is normalised into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterKey {
    Steps,
    Sampler,
    CfgScale,
    Seed,
    Size,
    Model,
    ModelHash,
    DenoisingStrength,
    ClipSkip,
    ScheduleType,
}

impl ParameterKey {
    /// Every key, in the order the legacy text format searches for them.
    pub const ALL: [ParameterKey; 10] = [
        ParameterKey::Steps,
        ParameterKey::Sampler,
        ParameterKey::CfgScale,
        ParameterKey::Seed,
        ParameterKey::Size,
        ParameterKey::Model,
        ParameterKey::ModelHash,
        ParameterKey::DenoisingStrength,
        ParameterKey::ClipSkip,
        ParameterKey::ScheduleType,
    ];

    /// The order parameters are shown to users in.
    pub const DISPLAY_ORDER: [ParameterKey; 10] = [
        ParameterKey::Model,
        ParameterKey::ModelHash,
        ParameterKey::Steps,
        ParameterKey::Sampler,
        ParameterKey::CfgScale,
        ParameterKey::Seed,
        ParameterKey::Size,
        ParameterKey::DenoisingStrength,
        ParameterKey::ClipSkip,
        ParameterKey::ScheduleType,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ParameterKey::Steps => "Steps",
            ParameterKey::Sampler => "Sampler",
            ParameterKey::CfgScale => "CFG scale",
            ParameterKey::Seed => "Seed",
            ParameterKey::Size => "Size",
            ParameterKey::Model => "Model",
            ParameterKey::ModelHash => "Model hash",
            ParameterKey::DenoisingStrength => "Denoising strength",
            ParameterKey::ClipSkip => "Clip skip",
            ParameterKey::ScheduleType => "Schedule Type",
        }
    }

    pub fn from_label(label: &str) -> Option<ParameterKey> {
        ParameterKey::ALL.into_iter().find(|key| key.label() == label)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalised generation parameters for one image.
///
/// Built by one of the dialect parsers and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterRecord {
    positive_prompt: String,
    negative_prompt: String,
    parameters: [String; 10],
    extra: String,
}

impl Default for ParameterRecord {
    fn default() -> Self {
        Self {
            positive_prompt: NOT_AVAILABLE.to_owned(),
            negative_prompt: NOT_AVAILABLE.to_owned(),
            parameters: std::array::from_fn(|_| NOT_AVAILABLE.to_owned()),
            extra: NOT_AVAILABLE.to_owned(),
        }
    }
}

impl ParameterRecord {
    pub fn positive_prompt(&self) -> &str {
        &self.positive_prompt
    }

    pub fn negative_prompt(&self) -> &str {
        &self.negative_prompt
    }

    pub fn get(&self, key: ParameterKey) -> &str {
        &self.parameters[key.index()]
    }

    /// Free-form trailing lines of legacy text that matched no known key.
    pub fn extra(&self) -> &str {
        &self.extra
    }

    pub fn is_set(&self, key: ParameterKey) -> bool {
        self.get(key) != NOT_AVAILABLE
    }

    /// Parameters that were actually supplied, in display order.
    pub fn present(&self) -> impl Iterator<Item = (ParameterKey, &str)> {
        ParameterKey::DISPLAY_ORDER
            .into_iter()
            .map(|key| (key, self.get(key)))
            .filter(|(_, value)| *value != NOT_AVAILABLE)
    }
}

/// Mutable view used by the parsers while a record is being assembled.
#[derive(Default)]
pub(crate) struct RecordBuilder(ParameterRecord);

impl RecordBuilder {
    pub fn positive_prompt(&self) -> &str {
        &self.0.positive_prompt
    }

    pub fn negative_prompt(&self) -> &str {
        &self.0.negative_prompt
    }

    pub fn set_positive_prompt(&mut self, prompt: impl Into<String>) {
        self.0.positive_prompt = prompt.into();
    }

    pub fn set_negative_prompt(&mut self, prompt: impl Into<String>) {
        self.0.negative_prompt = prompt.into();
    }

    pub fn get(&self, key: ParameterKey) -> &str {
        self.0.get(key)
    }

    pub fn set(&mut self, key: ParameterKey, value: impl Into<String>) {
        self.0.parameters[key.index()] = value.into();
    }

    pub fn set_extra(&mut self, extra: impl Into<String>) {
        self.0.extra = extra.into();
    }

    /// Applies the sentinel to prompts that ended up blank.
    pub fn finish(mut self) -> ParameterRecord {
        for prompt in [&mut self.0.positive_prompt, &mut self.0.negative_prompt] {
            if prompt.trim().is_empty() {
                *prompt = NOT_AVAILABLE.to_owned();
            }
        }

        self.0
    }
}
