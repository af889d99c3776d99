use sqlite_relationships::demos;

const BANNER: &str = "=================++++++++++++=================";
const URL: &str = "https://ffetish.co/no_idea_where_this_leads";

fn capture(run: impl FnOnce(&mut Vec<u8>) -> sqlite_relationships::Result<()>) -> String {
    let mut out = Vec::new();
    run(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

const OFFENCES: [&str; 3] = [
    "offence: Farting in public.",
    "offence: Looking up skirts.",
    "offence: Stealing from the homeless.",
];

fn offence_listing(header: &str) -> Vec<&str> {
    let mut listing = vec![header];
    listing.extend(OFFENCES);
    listing
}

#[test]
fn test_one_to_many_lists_linked_offences_only() {
    let out = capture(|o| demos::one_to_many::run(o));
    assert_eq!(lines(&out), offence_listing("L. Lad's Offence:"));
}

#[test]
fn test_one_to_many_back_populates_walks_back_to_person() {
    let out = capture(|o| demos::one_to_many_back_populates::run(o));
    let mut expected = offence_listing("L. Lad's Offences:");
    expected.push("L. Lad");
    assert_eq!(lines(&out), expected);
}

#[test]
fn test_one_to_many_backref_walks_back_to_person() {
    let out = capture(|o| demos::one_to_many_backref::run(o));
    let mut expected = offence_listing("L. Lad's Offence:");
    expected.push("L. Lad");
    assert_eq!(lines(&out), expected);
}

#[test]
fn test_many_to_one_reports_visit() {
    let out = capture(|o| demos::many_to_one::run(o));
    assert_eq!(lines(&out), vec!["Jeff has been visiting", URL]);
}

#[test]
fn test_many_to_one_variants_list_visitors() {
    let expected = vec!["Jeff has been visiting", URL, "Jeff", "Jeruska", "Bongani"];

    let out = capture(|o| demos::many_to_one_back_populates::run(o));
    assert_eq!(lines(&out), expected);

    let out = capture(|o| demos::many_to_one_backref::run(o));
    assert_eq!(lines(&out), expected);
}

#[test]
fn test_one_to_one_rejects_second_bar_code() {
    let out = capture(|o| demos::one_to_one::run(o));
    assert_eq!(
        lines(&out),
        vec![
            "Unit-7 wears bar code 0451-7734",
            "bar code 0451-7734 belongs to Unit-7",
            "second bar code rejected for Unit-7",
        ]
    );
}

fn cats_block(human: &str, cats: &[(i64, &str)]) -> String {
    let mut block = format!(
        "{BANNER}\nBegin query for parent and children\n\
         ----------------------------------------------\nHuman: {human}'s cats:\n"
    );
    for (id, name) in cats {
        block.push_str(&format!("cat_id: {id} | cat_name: {name}\n"));
    }
    block.push_str(&format!("{BANNER}\n\n"));
    block
}

fn expected_many_to_many() -> String {
    let mut expected = cats_block(
        "LibreLad",
        &[(1, "Scratches"), (2, "Patches"), (3, "Wombat")],
    );
    expected.push_str(&cats_block("LibreLas", &[(1, "Scratches"), (3, "Wombat")]));
    for (human, cat) in [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3)] {
        expected.push_str(&format!("human_id: {human} | cat_id: {cat}\n"));
    }
    expected
}

#[test]
fn test_many_to_many_prints_cats_and_mapper() {
    let out = capture(|o| demos::many_to_many::run(o));
    assert_eq!(out, expected_many_to_many());
}

#[test]
fn test_late_mapper_adds_backref_lines() {
    let out = capture(|o| demos::many_to_many_late_mapper::run(o));
    let mut expected = expected_many_to_many();
    expected.push_str("Wombat knows LibreLad\nWombat knows LibreLas\n");
    assert_eq!(out, expected);
}

#[test]
fn test_many_to_many_delete_drops_one_row() {
    let out = capture(|o| demos::many_to_many_delete::run(o));
    assert_eq!(
        lines(&out),
        vec![
            "No. of records in mapper: 1",
            "human_id: 1 | cat_id: 1",
            "No. of records in mapper: 0",
        ]
    );
}

#[test]
fn test_many_to_many_delete_all_cascades() {
    let out = capture(|o| demos::many_to_many_delete_all::run(o));
    assert_eq!(
        lines(&out),
        vec![
            "No. of records in mapper: 4",
            "human_id: 1 | cat_id: 1",
            "human_id: 1 | cat_id: 2",
            "human_id: 1 | cat_id: 3",
            "human_id: 1 | cat_id: 4",
            "No. of records in mapper: 0",
            "Scratches",
            "[]",
        ]
    );
}

#[test]
fn test_association_object_lists_links_and_drivers() {
    let out = capture(|o| demos::association_object::run(o));
    assert_eq!(
        lines(&out),
        vec![
            "human 1 : car 1",
            "human 1 : car 2",
            "human 2 : car 2",
            "VW",
            "Tesla",
            "VW drivers: Libre",
        ]
    );
}

const SEQUENCE: [&str; 6] = [
    "a: id=1 name=first",
    "a: id=2 name=second",
    "a: id=4 name=fourth",
    "b: id=1 name=first",
    "b: id=2 name=second",
    "b: id=3 name=fourth",
];

#[test]
fn test_sequence_keeps_counting_after_delete() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sequence.db");
    let out = capture(|o| demos::sequence::run_at(&path, o));
    assert_eq!(lines(&out), SEQUENCE);

    // a second run starts from a fresh file
    let again = capture(|o| demos::sequence::run_at(&path, o));
    assert_eq!(again, out);
}

#[test]
fn test_sequence_runs_in_scratch_directory() {
    let first = capture(|o| demos::sequence::run(o));
    let second = capture(|o| demos::sequence::run(o));
    assert_eq!(lines(&first), SEQUENCE);
    assert_eq!(second, first);
}
