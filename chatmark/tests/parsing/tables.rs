//! Table parsing: alignments, piped and pipeless forms.

use crate::common::{standard_ast, standard_html};
use chatmark::{Alignment, AstNode};

#[test]
fn separator_cells_set_column_alignment() {
    let nodes = standard_ast("| A | B | C |\n| :-- | :-: | --: |\n| a | b |\n");
    match &nodes[0] {
        AstNode::Table { headers, rows, .. } => {
            let aligns: Vec<Option<Alignment>> =
                headers.iter().map(|cell| cell.alignment).collect();
            assert_eq!(
                aligns,
                vec![
                    Some(Alignment::Left),
                    Some(Alignment::Center),
                    Some(Alignment::Right)
                ]
            );
            assert!(headers.iter().all(|cell| cell.header));
            assert_eq!(rows.len(), 1);
            // the short row only gets alignments for the cells it has
            let row_aligns: Vec<Option<Alignment>> =
                rows[0].cells.iter().map(|cell| cell.alignment).collect();
            assert_eq!(
                row_aligns,
                vec![Some(Alignment::Left), Some(Alignment::Center)]
            );
        }
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn aligned_table_renders_styles() {
    assert_eq!(
        standard_html("| A | B |\n| :-- | --: |\n| a | b |\n"),
        "<table>\n<thead>\n\
         <th style=\"text-align:left\">A</th>\n\
         <th style=\"text-align:right\">B</th>\n\
         </thead>\n<tbody>\n\
         <tr><td style=\"text-align:left\">a</td>\n\
         <td style=\"text-align:right\">b</td>\n</tr>\n\
         </tbody>\n</table>\n"
    );
}

#[test]
fn pipeless_table_form() {
    assert_eq!(
        standard_html("A | B\n--- | ---\na | b\n"),
        "<table>\n<thead>\n<th>A</th>\n<th>B</th>\n</thead>\n\
         <tbody>\n<tr><td>a</td>\n<td>b</td>\n</tr>\n</tbody>\n</table>\n"
    );
}

#[test]
fn dashes_only_separator_means_no_alignment() {
    let nodes = standard_ast("| A |\n| --- |\n| a |\n");
    match &nodes[0] {
        AstNode::Table { headers, .. } => assert_eq!(headers[0].alignment, None),
        other => panic!("expected table, got {other:?}"),
    }
}
