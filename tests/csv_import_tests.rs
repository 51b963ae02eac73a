use hoops_coach_lambda_rust::csv_import::{parse_stats_csv, template, CsvImportError};
use hoops_coach_lambda_rust::model::stats::BasketballStatsCreate;

#[test]
fn parses_aliased_headers() {
    let csv = "Points For,Opp Score,FGM,FGA,3PM,3PA,FTM,FTA,OREB,DREB,AST,STL,BLK,TO,PF,Pace\n\
               58,51,21,48,6,17,10,14,8,22,13,7,2,11,15,64\n";
    let rows = parse_stats_csv(csv).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0],
        BasketballStatsCreate {
            points_for: 58,
            points_against: 51,
            fg_made: 21,
            fg_att: 48,
            three_made: 6,
            three_att: 17,
            ft_made: 10,
            ft_att: 14,
            rebounds_off: 8,
            rebounds_def: 22,
            assists: 13,
            steals: 7,
            blocks: 2,
            turnovers: 11,
            fouls: 15,
            pace_estimate: Some(64),
        }
    );
}

#[test]
fn blank_cells_are_zero_and_bad_pace_is_dropped() {
    let rows = parse_stats_csv("points_for,points_against,assists,pace_estimate\n40,38,,fast\n").unwrap();
    assert_eq!(rows[0].assists, 0);
    assert_eq!(rows[0].pace_estimate, None);
}

#[test]
fn template_example_row_parses() {
    let rows = parse_stats_csv(&template()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].points_for, 85);
    assert_eq!(rows[0].fg_att, 65);
    assert_eq!(rows[0].pace_estimate, None);
}

#[test]
fn later_duplicate_column_wins() {
    for _ in 0..20 {
        let rows = parse_stats_csv("points_for,points_against,fgm,fg_made,fga\n80,70,3,9,10\n").unwrap();
        assert_eq!(rows[0].fg_made, 9);
    }
}

#[test]
fn quoted_cell_may_span_lines() {
    let rows = parse_stats_csv("points_for,points_against,notes\n80,70,\"a\nb\"\n").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].points_for, 80);
}

#[test]
fn row_numbers_count_records_not_lines() {
    let err = parse_stats_csv("points_for,points_against,notes\r\n80,70,\"two\nlines\"\r\n81,x,ok\r\n").unwrap_err();
    assert_eq!(err, CsvImportError::InvalidValue { row: 3, column: "points_against".into(), value: "x".into() });
}

#[test]
fn required_columns_are_enforced() {
    let err = parse_stats_csv("fgm,fga\n3,5\n").unwrap_err();
    assert_eq!(err, CsvImportError::MissingColumns(vec!["points_for".into(), "points_against".into()]));
    assert_eq!(err.to_string(), "Missing required columns: points_for, points_against");
}

#[test]
fn empty_input_and_header_only_are_errors() {
    assert_eq!(parse_stats_csv("").unwrap_err(), CsvImportError::Empty);
    assert_eq!(parse_stats_csv("\n\n").unwrap_err(), CsvImportError::Empty);
    assert_eq!(parse_stats_csv("points_for,points_against\n").unwrap_err(), CsvImportError::NoRows);
}

#[test]
fn non_integer_names_row_and_column() {
    let err = parse_stats_csv("points_for,points_against,fg_made\n50,40,12\n52,41,abc\n").unwrap_err();
    assert_eq!(
        err,
        CsvImportError::InvalidValue { row: 3, column: "fg_made".into(), value: "abc".into() }
    );
}

#[test]
fn rows_pass_the_box_score_check() {
    let err = parse_stats_csv("points_for,points_against,fgm,fga\n50,40,22,20\n").unwrap_err();
    match err {
        CsvImportError::Invalid { row, errors } => {
            assert_eq!(row, 2);
            assert!(errors.has("fg_made"));
        }
        other => panic!("expected invalid row, got {other:?}"),
    }
}

#[test]
fn every_row_is_returned() {
    let rows = parse_stats_csv("points_for,points_against\n50,40\n61,59\n").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].points_against, 59);
}
