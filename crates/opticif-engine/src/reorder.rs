use std::collections::BTreeSet;
use std::path::Path;

use crate::error::ReorderError;
use crate::lines::push_line;
use crate::scan::ScanOutput;
use crate::sequence::NameSequence;

/// Prefix added to every line of an item inside a group.
pub const GROUP_INDENT: &str = "    ";

pub fn group_open(label: &str) -> String {
    format!("group {label}:\n")
}

pub const GROUP_CLOSE: &str = "end\n";

/// Builds the reordered block: the captured lines of each name, in sequence order.
///
/// With labels, contiguous runs of the same non-empty label are wrapped in a
/// group and indented. Runs are positional: a label that shows up again after
/// a different label (or after unlabelled names) opens a second group.
pub fn reorder(
    scan: &ScanOutput,
    sequence: &NameSequence,
    document: &Path,
) -> Result<Vec<String>, ReorderError> {
    if !scan.duplicates.is_empty() {
        return Err(ReorderError::DuplicateItems {
            names: scan.duplicates.iter().cloned().collect(),
        });
    }

    let missing: BTreeSet<&str> = sequence
        .names()
        .iter()
        .map(String::as_str)
        .filter(|name| !scan.items.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(ReorderError::MissingItems {
            document: document.to_path_buf(),
            names: missing.into_iter().map(str::to_string).collect(),
        });
    }

    let mut block = Vec::new();
    let mut current: Option<&str> = None;

    for (name, label) in sequence.entries() {
        if label != current {
            if current.is_some() {
                push_line(&mut block, GROUP_CLOSE.to_string());
            }
            if let Some(label) = label {
                push_line(&mut block, group_open(label));
            }
            current = label;
        }

        for line in &scan.items[name] {
            let line = match current {
                Some(_) => format!("{GROUP_INDENT}{line}"),
                None => line.clone(),
            };
            push_line(&mut block, line);
        }
    }

    if current.is_some() {
        push_line(&mut block, GROUP_CLOSE.to_string());
    }

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ScanMode;
    use crate::scan::BlockScanner;
    use crate::tests::lines;
    use pretty_assertions::assert_eq;

    const DOC: &str = "\
A: PA();
B: PB(
  1);
C: PC();
D: PD();
";

    fn scan_doc(names: &[&str]) -> ScanOutput {
        BlockScanner::for_mode(ScanMode::Instantiation, names.iter().copied())
            .unwrap()
            .scan(&lines(DOC))
            .unwrap()
    }

    fn names(list: &[&str]) -> NameSequence {
        NameSequence::new(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_unlabelled_reorder_follows_sequence() {
        let scan = scan_doc(&["A", "B", "C", "D"]);

        let block = reorder(&scan, &names(&["C", "A", "D", "B"]), Path::new("m.cif")).unwrap();

        assert_eq!(
            block.concat(),
            "C: PC();\nA: PA();\nD: PD();\nB: PB(\n  1);\n"
        );
    }

    #[test]
    fn test_duplicates_fail_first() {
        let mut scan = scan_doc(&["A"]);
        scan.duplicates.insert("Z".to_string());
        scan.duplicates.insert("A".to_string());

        let err = reorder(&scan, &names(&["A", "missing"]), Path::new("m.cif")).unwrap_err();

        match err {
            ReorderError::DuplicateItems { names } => assert_eq!(names, vec!["A", "Z"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_names_reported_together() {
        let scan = scan_doc(&["A", "B"]);

        let err = reorder(&scan, &names(&["Y", "A", "X"]), Path::new("m.cif")).unwrap_err();

        match err {
            ReorderError::MissingItems { document, names } => {
                assert_eq!(document, Path::new("m.cif"));
                assert_eq!(names, vec!["X", "Y"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_contiguous_labels_form_one_group() {
        let scan = scan_doc(&["A", "B", "C"]);
        let seq = NameSequence::from_pairs([("A", "g1"), ("B", "g1"), ("C", "")]);

        let block = reorder(&scan, &seq, Path::new("m.cif")).unwrap();

        insta::assert_snapshot!(block.concat(), @r"
group g1:
    A: PA();
    B: PB(
      1);
end
C: PC();
");
    }

    #[test]
    fn test_label_change_closes_previous_group() {
        let scan = scan_doc(&["A", "B", "C"]);
        let seq = NameSequence::from_pairs([("A", "g1"), ("B", "g2"), ("C", "g2")]);

        let block = reorder(&scan, &seq, Path::new("m.cif")).unwrap();

        assert_eq!(
            block,
            vec![
                "group g1:\n",
                "    A: PA();\n",
                "end\n",
                "group g2:\n",
                "    B: PB(\n",
                "      1);\n",
                "    C: PC();\n",
                "end\n",
            ]
        );
    }

    #[test]
    fn test_split_label_runs_produce_separate_groups() {
        let scan = scan_doc(&["A", "C", "D"]);
        let seq = NameSequence::from_pairs([("A", "g1"), ("C", ""), ("D", "g1")]);

        let block = reorder(&scan, &seq, Path::new("m.cif")).unwrap();

        let opens = block.iter().filter(|l| *l == "group g1:\n").count();
        let closes = block.iter().filter(|l| *l == GROUP_CLOSE).count();
        assert_eq!((opens, closes), (2, 2));
        assert_eq!(
            block.concat(),
            "group g1:\n    A: PA();\nend\nC: PC();\ngroup g1:\n    D: PD();\nend\n"
        );
    }

    #[test]
    fn test_unterminated_last_item_line_is_terminated_before_next() {
        let scan = BlockScanner::for_mode(ScanMode::Instantiation, ["A", "B"])
            .unwrap()
            .scan(&lines("B: P;\nA: P;"))
            .unwrap();

        let block = reorder(&scan, &names(&["A", "B"]), Path::new("m.cif")).unwrap();

        assert_eq!(block.concat(), "A: P;\nB: P;\n");
    }
}
