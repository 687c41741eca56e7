use std::collections::BTreeMap;

use toldiff::classfile::access_flags::{ACC_ABSTRACT, ACC_DEPRECATED, ACC_PRIVATE, ACC_PUBLIC};
use toldiff::classfile::{ClassInfo, FieldInfo, Info, MethodInfo};
use toldiff::diff::diff;
use toldiff::{
    compare, DeltaAccumulator, DiffHandler, Difference, PublicDiffCriteria, Result,
    SimpleDiffCriteria,
};

fn class(
    name: &str,
    access: u32,
    supername: Option<&str>,
    methods: Vec<MethodInfo>,
    fields: Vec<FieldInfo>,
) -> ClassInfo {
    ClassInfo::new(
        52,
        access,
        name,
        None,
        supername.map(str::to_string),
        Vec::new(),
        methods.into_iter().map(|m| (m.key(), m)).collect(),
        fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
    )
}

fn method(class_name: &str, access: u32, name: &str, desc: &str) -> MethodInfo {
    MethodInfo::new(class_name, access, name, desc, None, None)
}

fn field(class_name: &str, access: u32, name: &str, desc: &str) -> FieldInfo {
    FieldInfo::new(class_name, access, name, desc, None, None)
}

fn class_map(classes: Vec<ClassInfo>) -> BTreeMap<String, ClassInfo> {
    classes.into_iter().map(|c| (c.name.clone(), c)).collect()
}

/// Logs every event it receives, for sequence and determinism assertions.
#[derive(Debug, Default)]
struct RecordingHandler {
    events: Vec<String>,
}

impl RecordingHandler {
    fn log(&mut self, event: impl Into<String>) -> Result<()> {
        self.events.push(event.into());
        Ok(())
    }
}

impl DiffHandler for RecordingHandler {
    fn start_diff(&mut self, old_label: &str, new_label: &str) -> Result<()> {
        self.log(format!("start_diff {} {}", old_label, new_label))
    }

    fn start_old_contents(&mut self) -> Result<()> {
        self.log("start_old_contents")
    }

    fn end_old_contents(&mut self) -> Result<()> {
        self.log("end_old_contents")
    }

    fn start_new_contents(&mut self) -> Result<()> {
        self.log("start_new_contents")
    }

    fn end_new_contents(&mut self) -> Result<()> {
        self.log("end_new_contents")
    }

    fn contains(&mut self, info: &ClassInfo) -> Result<()> {
        self.log(format!("contains {}", info.name))
    }

    fn start_removed(&mut self) -> Result<()> {
        self.log("start_removed")
    }

    fn class_removed(&mut self, info: &ClassInfo) -> Result<()> {
        self.log(format!("class_removed {}", info.name))
    }

    fn end_removed(&mut self) -> Result<()> {
        self.log("end_removed")
    }

    fn start_added(&mut self) -> Result<()> {
        self.log("start_added")
    }

    fn class_added(&mut self, info: &ClassInfo) -> Result<()> {
        self.log(format!("class_added {}", info.name))
    }

    fn end_added(&mut self) -> Result<()> {
        self.log("end_added")
    }

    fn start_changed(&mut self) -> Result<()> {
        self.log("start_changed")
    }

    fn end_changed(&mut self) -> Result<()> {
        self.log("end_changed")
    }

    fn start_class_changed(&mut self, class_name: &str) -> Result<()> {
        self.log(format!("start_class_changed {}", class_name))
    }

    fn end_class_changed(&mut self) -> Result<()> {
        self.log("end_class_changed")
    }

    fn field_removed(&mut self, info: &FieldInfo) -> Result<()> {
        self.log(format!("field_removed {}", info.name))
    }

    fn method_removed(&mut self, info: &MethodInfo) -> Result<()> {
        self.log(format!("method_removed {}", info.key()))
    }

    fn field_added(&mut self, info: &FieldInfo) -> Result<()> {
        self.log(format!("field_added {}", info.name))
    }

    fn method_added(&mut self, info: &MethodInfo) -> Result<()> {
        self.log(format!("method_added {}", info.key()))
    }

    fn class_changed(&mut self, old: &ClassInfo, _new: &ClassInfo) -> Result<()> {
        self.log(format!("class_changed {}", old.name))
    }

    fn class_deprecated(&mut self, old: &ClassInfo, _new: &ClassInfo) -> Result<()> {
        self.log(format!("class_deprecated {}", old.name))
    }

    fn field_changed(&mut self, old: &FieldInfo, _new: &FieldInfo) -> Result<()> {
        self.log(format!("field_changed {}", old.name))
    }

    fn field_changed_compat(&mut self, old: &FieldInfo, _new: &FieldInfo) -> Result<()> {
        self.log(format!("field_changed_compat {}", old.name))
    }

    fn field_deprecated(&mut self, old: &FieldInfo, _new: &FieldInfo) -> Result<()> {
        self.log(format!("field_deprecated {}", old.name))
    }

    fn method_changed(&mut self, old: &MethodInfo, _new: &MethodInfo) -> Result<()> {
        self.log(format!("method_changed {}", old.key()))
    }

    fn method_changed_compat(&mut self, old: &MethodInfo, _new: &MethodInfo) -> Result<()> {
        self.log(format!("method_changed_compat {}", old.key()))
    }

    fn method_deprecated(&mut self, old: &MethodInfo, _new: &MethodInfo) -> Result<()> {
        self.log(format!("method_deprecated {}", old.key()))
    }

    fn end_diff(&mut self) -> Result<()> {
        self.log("end_diff")
    }
}

#[test]
fn identical_snapshots_produce_no_differences() {
    let build = || {
        class_map(vec![class(
            "a/X",
            ACC_PUBLIC,
            Some("java/lang/Object"),
            vec![method("a/X", ACC_PUBLIC, "m", "()V")],
            vec![field("a/X", ACC_PUBLIC, "count", "I")],
        )])
    };
    let delta = compare(&PublicDiffCriteria, "1.0.0", "1.0.1", &build(), &build()).expect("diff");
    assert!(delta.is_empty(), "unexpected differences: {:?}", delta.differences());
}

#[test]
fn added_and_removed_classes_are_reported() {
    let old = class_map(vec![
        class("a/Kept", ACC_PUBLIC, Some("java/lang/Object"), vec![], vec![]),
        class("a/Gone", ACC_PUBLIC, Some("java/lang/Object"), vec![], vec![]),
    ]);
    let new = class_map(vec![
        class("a/Kept", ACC_PUBLIC, Some("java/lang/Object"), vec![], vec![]),
        class("a/Fresh", ACC_PUBLIC, Some("java/lang/Object"), vec![], vec![]),
    ]);

    let delta = compare(&PublicDiffCriteria, "old", "new", &old, &new).expect("diff");
    let differences = delta.differences();
    assert_eq!(differences.len(), 2);
    assert!(matches!(
        &differences[0],
        Difference::Add { class_name, info: Info::Class(_) } if class_name == "a/Fresh"
    ));
    assert!(matches!(
        &differences[1],
        Difference::Remove { class_name, info: Info::Class(_) } if class_name == "a/Gone"
    ));
}

#[test]
fn invisible_classes_are_not_reported() {
    let old = class_map(vec![class("a/Hidden", 0, Some("java/lang/Object"), vec![], vec![])]);
    let new = class_map(vec![]);
    let delta = compare(&PublicDiffCriteria, "old", "new", &old, &new).expect("diff");
    assert!(delta.is_empty());
}

#[test]
fn deprecate_only_method_emits_exact_event_sequence() {
    let old = class_map(vec![class(
        "a/X",
        ACC_PUBLIC,
        Some("java/lang/Object"),
        vec![method("a/X", ACC_PUBLIC, "m", "()V")],
        vec![],
    )]);
    let new = class_map(vec![class(
        "a/X",
        ACC_PUBLIC,
        Some("java/lang/Object"),
        vec![method("a/X", ACC_PUBLIC | ACC_DEPRECATED, "m", "()V")],
        vec![],
    )]);

    let mut handler = RecordingHandler::default();
    diff(&mut handler, &PublicDiffCriteria, "1.2.3", "1.3.0", &old, &new).expect("diff");

    let expected = vec![
        "start_diff 1.2.3 1.3.0",
        "start_old_contents",
        "contains a/X",
        "end_old_contents",
        "start_new_contents",
        "contains a/X",
        "end_new_contents",
        "start_removed",
        "end_removed",
        "start_added",
        "end_added",
        "start_changed",
        "start_class_changed a/X",
        "start_removed",
        "end_removed",
        "start_added",
        "end_added",
        "start_changed",
        "method_deprecated m()V",
        "end_changed",
        "end_class_changed",
        "end_changed",
        "end_diff",
    ];
    assert_eq!(handler.events, expected);
}

#[test]
fn members_are_emitted_fields_first_in_sorted_key_order() {
    let old = class_map(vec![class(
        "a/X",
        ACC_PUBLIC,
        Some("java/lang/Object"),
        vec![
            method("a/X", ACC_PUBLIC, "zap", "()V"),
            method("a/X", ACC_PUBLIC, "act", "()V"),
        ],
        vec![
            field("a/X", ACC_PUBLIC, "zeta", "I"),
            field("a/X", ACC_PUBLIC, "alpha", "I"),
        ],
    )]);
    let new = class_map(vec![class("a/X", ACC_PUBLIC, Some("java/lang/Object"), vec![], vec![])]);

    let mut handler = RecordingHandler::default();
    diff(&mut handler, &PublicDiffCriteria, "old", "new", &old, &new).expect("diff");

    let removals: Vec<&String> = handler
        .events
        .iter()
        .filter(|event| event.starts_with("field_removed") || event.starts_with("method_removed"))
        .collect();
    assert_eq!(
        removals,
        vec![
            "field_removed alpha",
            "field_removed zeta",
            "method_removed act()V",
            "method_removed zap()V",
        ]
    );
}

#[test]
fn diff_output_is_deterministic() {
    let build_old = || {
        class_map(vec![
            class(
                "a/A",
                ACC_PUBLIC,
                Some("java/lang/Object"),
                vec![method("a/A", ACC_PUBLIC, "m", "()V"), method("a/A", ACC_PUBLIC, "m", "(I)V")],
                vec![field("a/A", ACC_PUBLIC, "x", "I")],
            ),
            class("a/B", ACC_PUBLIC, Some("a/A"), vec![], vec![]),
            class("a/Gone", ACC_PUBLIC, Some("java/lang/Object"), vec![], vec![]),
        ])
    };
    let build_new = || {
        class_map(vec![
            class(
                "a/A",
                ACC_PUBLIC,
                Some("java/lang/Object"),
                vec![method("a/A", ACC_PUBLIC | ACC_DEPRECATED, "m", "()V")],
                vec![field("a/A", ACC_PRIVATE, "x", "I")],
            ),
            class("a/B", ACC_PUBLIC | ACC_ABSTRACT, Some("a/A"), vec![], vec![]),
            class("a/Fresh", ACC_PUBLIC, Some("java/lang/Object"), vec![], vec![]),
        ])
    };

    let mut first = RecordingHandler::default();
    diff(&mut first, &PublicDiffCriteria, "old", "new", &build_old(), &build_new()).expect("diff");
    let mut second = RecordingHandler::default();
    diff(&mut second, &PublicDiffCriteria, "old", "new", &build_old(), &build_new()).expect("diff");

    assert!(!first.events.is_empty());
    assert_eq!(first.events, second.events);
}

#[test]
fn member_gone_but_inherited_in_new_snapshot_is_not_removed() {
    let old = class_map(vec![
        class(
            "a/Child",
            ACC_PUBLIC,
            Some("a/Parent"),
            vec![method("a/Child", ACC_PUBLIC, "m", "()V")],
            vec![],
        ),
        class("a/Parent", ACC_PUBLIC, Some("java/lang/Object"), vec![], vec![]),
    ]);
    let new = class_map(vec![
        class("a/Child", ACC_PUBLIC, Some("a/Parent"), vec![], vec![]),
        class(
            "a/Parent",
            ACC_PUBLIC,
            Some("java/lang/Object"),
            vec![method("a/Parent", ACC_PUBLIC, "m", "()V")],
            vec![],
        ),
    ]);

    let delta = compare(&PublicDiffCriteria, "old", "new", &old, &new).expect("diff");
    assert!(
        !delta.differences().iter().any(|d| matches!(d, Difference::Remove { .. })),
        "inherited member must not be reported as removed: {:?}",
        delta.differences()
    );
    // The move itself still surfaces as the parent gaining the method.
    assert_eq!(delta.differences().len(), 1);
    assert!(matches!(
        &delta.differences()[0],
        Difference::Add { class_name, info: Info::Method(m) } if class_name == "a/Parent" && m.name == "m"
    ));
}

#[test]
fn private_inherited_member_does_not_suppress_removal() {
    let old = class_map(vec![
        class(
            "a/Child",
            ACC_PUBLIC,
            Some("a/Parent"),
            vec![method("a/Child", ACC_PUBLIC, "m", "()V")],
            vec![],
        ),
        class("a/Parent", ACC_PUBLIC, Some("java/lang/Object"), vec![], vec![]),
    ]);
    let new = class_map(vec![
        class("a/Child", ACC_PUBLIC, Some("a/Parent"), vec![], vec![]),
        class(
            "a/Parent",
            ACC_PUBLIC,
            Some("java/lang/Object"),
            vec![method("a/Parent", ACC_PRIVATE, "m", "()V")],
            vec![],
        ),
    ]);

    let delta = compare(&PublicDiffCriteria, "old", "new", &old, &new).expect("diff");
    assert!(
        delta
            .differences()
            .iter()
            .any(|d| matches!(d, Difference::Remove { class_name, .. } if class_name == "a/Child")),
        "a private super member is no replacement: {:?}",
        delta.differences()
    );
}

#[test]
fn cyclic_supername_chain_terminates() {
    let old = class_map(vec![
        class(
            "a/A",
            ACC_PUBLIC,
            Some("a/B"),
            vec![method("a/A", ACC_PUBLIC, "m", "()V")],
            vec![],
        ),
        class("a/B", ACC_PUBLIC, Some("a/A"), vec![], vec![]),
    ]);
    let new = class_map(vec![
        class("a/A", ACC_PUBLIC, Some("a/B"), vec![], vec![]),
        class("a/B", ACC_PUBLIC, Some("a/A"), vec![], vec![]),
    ]);

    let delta = compare(&SimpleDiffCriteria::new(false), "old", "new", &old, &new).expect("diff");
    assert!(delta
        .differences()
        .iter()
        .any(|d| matches!(d, Difference::Remove { class_name, .. } if class_name == "a/A")));
}

#[test]
fn member_no_longer_matching_criteria_is_changed_not_removed() {
    // Narrowing public → private keeps the member in the changed bucket so the
    // report shows a change rather than a silent disappearance.
    let old = class_map(vec![class(
        "a/X",
        ACC_PUBLIC,
        Some("java/lang/Object"),
        vec![method("a/X", ACC_PUBLIC, "m", "()V")],
        vec![],
    )]);
    let new = class_map(vec![class(
        "a/X",
        ACC_PUBLIC,
        Some("java/lang/Object"),
        vec![method("a/X", ACC_PRIVATE, "m", "()V")],
        vec![],
    )]);

    let delta = compare(&PublicDiffCriteria, "old", "new", &old, &new).expect("diff");
    assert_eq!(delta.differences().len(), 1);
    assert!(matches!(
        &delta.differences()[0],
        Difference::Change { class_name, .. } if class_name == "a/X"
    ));
}

#[test]
fn accumulator_rejects_member_events_outside_a_class_scope() {
    let mut accumulator = DeltaAccumulator::new();
    let orphan = method("a/X", ACC_PUBLIC, "m", "()V");
    assert!(accumulator.method_removed(&orphan).is_err());
}

#[test]
fn accumulator_marks_development_snapshots() {
    let accumulator = DeltaAccumulator::new().development(true);
    assert!(accumulator.delta().is_development());
}
