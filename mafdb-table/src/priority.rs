use crate::Table;

/// Enables the secondary key of the table and fills it with the 1-based
/// position of each row within its run of equal primary keys.
///
/// ```text
/// primary    1 1 1 2 2
/// secondary  1 2 3 1 2
/// ```
///
/// This records the original order of exploded values, for example the
/// rank of each annotation of a variant, without reordering any rows.
/// Decompositions keep the parent row order so rows sharing a primary
/// key are always contiguous.
pub fn assign_priority_index(table: &mut Table<'_>) {
    table.use_secondary_index = true;

    let mut previous = None;
    let mut rank = 0;
    for (key, slot) in table.primary_index.iter().zip(table.secondary_index.iter_mut()) {
        if previous == Some(*key) {
            rank += 1;
        } else {
            previous = Some(*key);
            rank = 1;
        }
        *slot = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tokenize, Field, QuotingRule};

    fn exploded<'a>(lines: &[&'a str], starting_point: i64) -> Table<'a> {
        let mut table = Table::new(&["list"], &[QuotingRule::Quote], "root", starting_point).unwrap();
        for line in lines {
            for cell in tokenize(&Field::whole(line), '\t') {
                table.add(cell);
            }
        }
        table.split_rows("list", "items", ';').unwrap()
    }

    #[rstest::rstest]
    #[case(&["a;b;c", "d;e"], 0, vec![1, 1, 1, 2, 2], vec![1, 2, 3, 1, 2])]
    #[case(&["a;b;c", "d;e"], 5, vec![6, 6, 6, 7, 7], vec![1, 2, 3, 1, 2])]
    #[case(&["a", "b", "c"], 0, vec![1, 2, 3], vec![1, 1, 1])]
    #[case(&["a;b", "", "c;d;e"], 0, vec![1, 1, 3, 3, 3], vec![1, 2, 1, 2, 3])]
    fn test_priority_index_groups(
        #[case] lines: &[&str],
        #[case] starting_point: i64,
        #[case] expected_primary: Vec<i64>,
        #[case] expected_secondary: Vec<i64>,
    ) {
        let mut table = exploded(lines, starting_point);
        assign_priority_index(&mut table);

        assert!(table.uses_secondary_index());
        assert_eq!(table.primary_keys(), expected_primary.as_slice());
        assert_eq!(table.secondary_keys(), expected_secondary.as_slice());
    }

    #[test]
    fn test_priority_index_rendered_after_primary() {
        let mut table = exploded(&["x;y", "z"], 0);
        assert_eq!(
            table.echo(),
            "INSERT INTO items VALUES \n(1,'x'),\n(1,'y'),\n(2,'z');\n",
        );

        assign_priority_index(&mut table);
        assert_eq!(
            table.echo(),
            "INSERT INTO items VALUES \n(1,1,'x'),\n(1,2,'y'),\n(2,1,'z');\n",
        );
    }

    #[test]
    fn test_priority_index_on_chained_table() {
        let mut table = exploded(&["T,mis;K,syn;E,stop", "B,syn"], 0);
        let mut effects = table
            .split_cols("list", &["symbol", "consequence"], &[QuotingRule::Quote; 2], "effects", ',')
            .unwrap();
        assign_priority_index(&mut table);
        assign_priority_index(&mut effects);

        assert_eq!(effects.primary_keys(), &[1, 1, 1, 2]);
        assert_eq!(effects.secondary_keys(), &[1, 2, 3, 1]);
        assert_eq!(effects.secondary_keys(), table.secondary_keys());
    }

    #[test]
    fn test_priority_index_on_empty_table() {
        let mut table = exploded(&[""], 0);
        assign_priority_index(&mut table);
        assert!(table.is_empty());
        assert_eq!(table.echo(), "");
    }
}
