use std::fmt;

/// One labelled node of a dependency chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainItem {
    /// A bare unit name, used for path explanations.
    Raw(String),
    /// A unit together with its owning component, used for cycle detection.
    Compound { unit: String, component: String },
}

impl ChainItem {
    pub fn raw(name: impl Into<String>) -> Self {
        ChainItem::Raw(name.into())
    }

    pub fn compound(unit: impl Into<String>, component: impl Into<String>) -> Self {
        ChainItem::Compound {
            unit: unit.into(),
            component: component.into(),
        }
    }

    /// The label compared when looking for cycles.
    pub fn name(&self) -> &str {
        match self {
            ChainItem::Raw(name) => name,
            ChainItem::Compound { component, .. } => component,
        }
    }

    pub fn unit(&self) -> &str {
        match self {
            ChainItem::Raw(name) => name,
            ChainItem::Compound { unit, .. } => unit,
        }
    }
}

impl fmt::Display for ChainItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainItem::Raw(name) => f.write_str(name),
            ChainItem::Compound { unit, component } => write!(f, "{component} [{unit}]"),
        }
    }
}

/// Append-only sequence of chain items with incremental cycle detection.
///
/// Chains have value semantics: DFS branches clone before descending so siblings never
/// observe each other's appends. Once a chain is cyclic it stays cyclic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyChain {
    items: Vec<ChainItem>,
    last_name: Option<String>,
    cyclic: bool,
}

impl DependencyChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, item: ChainItem) {
        let name = item.name().to_string();
        let closes_cycle = self.items.first().is_some_and(|first| {
            first.name() == name && self.last_name.as_deref() != Some(name.as_str())
        });

        self.cyclic = self.cyclic || closes_cycle;
        self.last_name = Some(name);
        self.items.push(item);
    }

    /// Clone this chain and append `item` to the copy.
    pub fn with(&self, item: ChainItem) -> Self {
        let mut next = self.clone();
        next.append(item);
        next
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn items(&self) -> &[ChainItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last(&self) -> Option<&ChainItem> {
        self.items.last()
    }

    pub fn contains_unit(&self, unit: &str) -> bool {
        self.items.iter().any(|i| i.unit() == unit)
    }

    /// Directed edges between consecutive distinct names; self edges are dropped.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let Some(first) = self.items.first() else {
            return out;
        };

        let mut from = first.name();
        for item in &self.items[1..] {
            let to = item.name();
            if to == from {
                continue;
            }
            out.push((from.to_string(), to.to_string()));
            from = to;
        }
        out
    }
}

impl fmt::Display for DependencyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, item) in self.items.iter().enumerate() {
            if idx > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
