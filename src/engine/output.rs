use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum OutputBlock {
    Title(String),
    Text(String),
    Event(String),
    Exits(String),
    Status(String),
}

impl OutputBlock {
    pub fn text(&self) -> &str {
        match self {
            OutputBlock::Title(s)
            | OutputBlock::Text(s)
            | OutputBlock::Event(s)
            | OutputBlock::Exits(s)
            | OutputBlock::Status(s) => s,
        }
    }
}

/// Narrative produced by one command or one room render.
#[derive(Default, Debug, Clone, Serialize)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Title(s));
        }
    }

    pub fn say(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Text(s));
        }
    }

    pub fn event(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Event(s));
        }
    }

    pub fn set_exits(&mut self, s: impl Into<String>) {
        let s = s.into();
        if s.trim().is_empty() {
            return;
        }

        // only one Exits block per output
        self.blocks.retain(|b| !matches!(b, OutputBlock::Exits(_)));
        self.blocks.push(OutputBlock::Exits(s));
    }

    pub fn status(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Status(s));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// True if any block contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.blocks.iter().any(|b| b.text().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_dropped() {
        let mut out = Output::new();
        out.say("   ");
        out.event("");
        assert!(out.is_empty());
    }

    #[test]
    fn exits_block_is_replaced() {
        let mut out = Output::new();
        out.set_exits("Exits: north");
        out.say("A wolf growls.");
        out.set_exits("Exits: south");
        assert_eq!(
            out.blocks,
            vec![
                OutputBlock::Text("A wolf growls.".to_string()),
                OutputBlock::Exits("Exits: south".to_string()),
            ]
        );
        assert!(out.mentions("south"));
        assert!(!out.mentions("north"));
    }
}
