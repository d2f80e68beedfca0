use super::*;

#[test]
fn strips_cover_window_without_gaps() {
    let window = RectI::new(3, -4, 9, 13).unwrap();
    for n in 1..=20 {
        let rows = strip_rows(window, n);
        assert_eq!(rows.len(), n);
        assert_eq!(rows[0].start, window.y1);
        assert_eq!(rows[n - 1].end, window.y2);
        for pair in rows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let total: usize = rows.iter().map(|r| r.len()).sum();
        assert_eq!(total, window.height());
    }
}

#[test]
fn strips_are_near_equal() {
    let window = RectI::from_size(4, 10).unwrap();
    let rows = strip_rows(window, 3);
    assert_eq!(rows, vec![0..3, 3..6, 6..10]);

    let rows = strip_rows(window, 4);
    assert_eq!(rows, vec![0..2, 2..5, 5..7, 7..10]);
}

#[test]
fn more_strips_than_rows_yields_empty_strips() {
    let window = RectI::from_size(4, 2).unwrap();
    let rows = strip_rows(window, 5);
    let lens: Vec<usize> = rows.iter().map(|r| r.len()).collect();
    assert_eq!(lens, vec![0, 0, 1, 0, 1]);
}

#[test]
fn zero_is_treated_as_one_strip() {
    let window = RectI::from_size(4, 7).unwrap();
    assert_eq!(strip_rows(window, 0), vec![0..7]);
}

#[test]
fn strip_windows_keep_columns() {
    let window = RectI::new(2, 0, 6, 4).unwrap();
    let strips = strip_windows(window, 2);
    assert_eq!(
        strips,
        vec![
            RectI::new(2, 0, 6, 2).unwrap(),
            RectI::new(2, 2, 6, 4).unwrap()
        ]
    );
}
