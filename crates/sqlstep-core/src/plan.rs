use crate::script::{Script, ScriptVersion};

/// Ordered scripts selected for one run, ascending by version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub scripts: Vec<Script>,
    /// Version the database was at when the plan was computed.
    pub from_version: ScriptVersion,
    /// Set when the legacy schema replacement collapsed the selection.
    pub legacy_collapse: bool,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Script> {
        self.scripts.iter()
    }

    pub fn versions(&self) -> Vec<ScriptVersion> {
        self.scripts.iter().map(|s| s.version).collect()
    }

    /// Version recorded once every script has run.
    pub fn target_version(&self) -> ScriptVersion {
        self.scripts
            .last()
            .map(|s| s.version)
            .unwrap_or(self.from_version)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Script;
    type IntoIter = std::slice::Iter<'a, Script>;

    fn into_iter(self) -> Self::IntoIter {
        self.scripts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptTarget;

    #[test]
    fn empty_plan_targets_its_starting_version() {
        let plan = Plan {
            from_version: 4,
            ..Default::default()
        };
        assert!(plan.is_empty());
        assert_eq!(plan.target_version(), 4);
    }

    #[test]
    fn target_version_is_last_script() {
        let plan = Plan {
            scripts: vec![
                Script::new(5, ScriptTarget::Any, "SELECT 1;"),
                Script::new(6, ScriptTarget::Any, "SELECT 2;"),
            ],
            from_version: 4,
            legacy_collapse: false,
        };
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.versions(), vec![5, 6]);
        assert_eq!(plan.target_version(), 6);
        assert_eq!((&plan).into_iter().count(), 2);
    }
}
