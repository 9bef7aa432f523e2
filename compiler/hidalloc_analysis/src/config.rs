//! Analysis configuration.

/// Descriptor fragments identifying the calls the classifier cares about.
///
/// Matching is substring-based on [`MethodRef::full_name`], the same
/// descriptor debug symbols carry. Defaults name the CLR base library.
///
/// [`MethodRef::full_name`]: hidalloc_ir::MethodRef::full_name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellKnownMembers {
    /// Generic sequence interface whose enumerator may be heap-allocated.
    pub sequence_interface: String,
    /// "Get enumerator" member of the sequence interface.
    pub get_enumerator: String,
    /// "Advance" member of the enumerator.
    pub move_next: String,
    /// Virtual members of the universal object base that box a value-type
    /// receiver unless the value type overrides them.
    pub object_virtuals: Vec<String>,
}

impl Default for WellKnownMembers {
    fn default() -> Self {
        WellKnownMembers {
            sequence_interface: "System.Collections.Generic.IEnumerable".to_string(),
            get_enumerator: "GetEnumerator()".to_string(),
            move_next: "MoveNext()".to_string(),
            object_virtuals: vec![
                "System.Object::GetHashCode()".to_string(),
                "System.Object::ToString()".to_string(),
                "System.Object::Equals(System.Object)".to_string(),
            ],
        }
    }
}

impl WellKnownMembers {
    /// Whether `descriptor` names a member of the sequence interface that
    /// contains `member`.
    pub(crate) fn is_sequence_member(&self, descriptor: &str, member: &str) -> bool {
        descriptor.contains(self.sequence_interface.as_str()) && descriptor.contains(member)
    }

    pub(crate) fn is_object_virtual(&self, descriptor: &str) -> bool {
        self.object_virtuals
            .iter()
            .any(|virtual_member| descriptor.contains(virtual_member.as_str()))
    }
}

/// Configuration for one analysis run.
#[derive(Clone, Debug, Default)]
pub struct AnalysisConfig {
    pub members: WellKnownMembers,
    /// Classify groups on the rayon thread pool. Output is identical either way.
    pub parallel: bool,
}

impl AnalysisConfig {
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
