//! Integration tests for the table as a whole.
//!
//! Test categories:
//! - Filtering: column filter conjunction with the global query
//! - Sorting: stability and the header toggle cycle
//! - Pagination: clamping, page size resets, empty tables
//! - Scenarios: a realistic staff roster

#![forbid(unsafe_code)]

use tabula::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Employee {
    id: u32,
    name: &'static str,
    department: &'static str,
    role: &'static str,
}

fn employee_columns() -> Vec<ColumnDef<Employee>> {
    vec![
        ColumnDef::new("id", "ID", |e: &Employee| e.id.into())
            .width(4)
            .align(Align::Right)
            .searchable(false),
        ColumnDef::new("name", "Name", |e: &Employee| e.name.into()).width(18),
        ColumnDef::new("department", "Department", |e: &Employee| e.department.into())
            .filter_mode(FilterMode::Equals),
        ColumnDef::new("role", "Role", |e: &Employee| e.role.into()),
    ]
}

fn roster() -> Vec<Employee> {
    let data = [
        ("John Smith", "HR", "Manager"),
        ("Alice Brown", "HR", "Recruiter"),
        ("Johnny Park", "Fleet", "Driver"),
        ("Maria Garcia", "HR", "Clerk"),
        ("Peter Jones", "ICU", "Nurse"),
        ("Sara Lee", "Fleet", "Dispatcher"),
        ("Tom Hardy", "ICU", "Doctor"),
        ("Nina Patel", "HR", "Payroll"),
        ("Elton John", "Fleet", "Mechanic"),
        ("Olga Ivanova", "ICU", "Nurse"),
        ("Ravi Kumar", "Billing", "Analyst"),
        ("Zoe Adams", "Billing", "Clerk"),
    ];
    data.iter()
        .zip(1..)
        .map(|(&(name, department, role), id)| Employee {
            id,
            name,
            department,
            role,
        })
        .collect()
}

fn ids(page: &[&Employee]) -> Vec<u32> {
    page.iter().map(|e| e.id).collect()
}

mod filtering_tests {
    use super::*;

    #[derive(Debug)]
    struct Vehicle {
        plate: &'static str,
        kind: &'static str,
        status: &'static str,
    }

    #[test]
    fn test_filter_conjunction() {
        let rows = vec![
            Vehicle { plate: "AMB-01", kind: "ambulance", status: "active" },
            Vehicle { plate: "AMB-02", kind: "ambulance", status: "service" },
            Vehicle { plate: "VAN-07", kind: "van", status: "active" },
            Vehicle { plate: "AMB-11", kind: "ambulance", status: "active" },
            Vehicle { plate: "CAR-01", kind: "car", status: "active" },
        ];
        let columns = vec![
            ColumnDef::new("plate", "Plate", |v: &Vehicle| v.plate.into()),
            ColumnDef::new("kind", "Kind", |v: &Vehicle| v.kind.into()),
            ColumnDef::new("status", "Status", |v: &Vehicle| v.status.into()),
        ];

        let mut table = DataTable::new(columns, &rows);
        table.set_column_filter("kind", "ambulance");
        table.set_column_filter("status", "active");
        table.set_global_query("01");

        let plates: Vec<&str> = table.page().iter().map(|v| v.plate).collect();
        assert_eq!(plates, vec!["AMB-01"]);

        // Every row passes iff it satisfies all three conditions.
        for v in &rows {
            let expected = v.kind.contains("ambulance")
                && v.status.contains("active")
                && [v.plate, v.kind, v.status]
                    .iter()
                    .any(|s| s.to_lowercase().contains("01"));
            assert_eq!(plates.contains(&v.plate), expected, "{v:?}");
        }
    }

    #[test]
    fn test_global_query_case_insensitive_substring() {
        let rows = roster();
        let mut table = DataTable::new(employee_columns(), &rows);
        table.set_global_query("JOHN");
        assert_eq!(ids(&table.page()), vec![1, 3, 9]);
    }

    #[test]
    fn test_idempotent_global_query() {
        let rows = roster();
        let mut table = DataTable::new(employee_columns(), &rows);

        table.set_global_query("nurse");
        let first = ids(&table.page());
        table.set_global_query("nurse");
        let second = ids(&table.page());

        assert_eq!(first, second);
        assert_eq!(first, vec![5, 10]);
    }

    #[test]
    fn test_empty_filter_means_no_filter() {
        let rows = roster();
        let mut table = DataTable::new(employee_columns(), &rows);
        table.set_column_filter("department", "");
        table.set_global_query("");
        assert_eq!(table.filtered_count(), 12);
    }

    #[test]
    fn test_clear_filters() {
        let rows = roster();
        let mut table = DataTable::new(employee_columns(), &rows);
        table.set_column_filter("department", "ICU");
        assert_eq!(table.filtered_count(), 3);
        table.clear_column_filter("department");
        assert_eq!(table.filtered_count(), 12);

        table.set_column_filter("department", "ICU");
        table.set_global_query("olga");
        table.clear_filters();
        assert_eq!(table.filtered_count(), 12);
    }
}

mod sorting_tests {
    use super::*;

    #[derive(Debug)]
    struct Kv {
        k: i64,
        v: &'static str,
    }

    #[test]
    fn test_stable_sort() {
        let rows = vec![
            Kv { k: 1, v: "a" },
            Kv { k: 1, v: "b" },
            Kv { k: 0, v: "c" },
        ];
        let columns = vec![
            ColumnDef::new("k", "k", |r: &Kv| r.k.into()),
            ColumnDef::new("v", "v", |r: &Kv| r.v.into()),
        ];
        let mut table = DataTable::new(columns, &rows);
        table.toggle_sort("k");

        let out: Vec<(i64, &str)> = table.page().iter().map(|r| (r.k, r.v)).collect();
        assert_eq!(out, vec![(0, "c"), (1, "a"), (1, "b")]);
    }

    #[test]
    fn test_header_toggle_cycle() {
        let rows = roster();
        let mut table = DataTable::new(employee_columns(), &rows);

        table.toggle_sort("name");
        assert_eq!(table.page()[0].name, "Alice Brown");
        assert_eq!(table.header_cells()[1].direction, Some(Direction::Ascending));

        table.toggle_sort("name");
        assert_eq!(table.page()[0].name, "Zoe Adams");

        table.toggle_sort("name");
        assert!(table.sort().is_empty());
        assert_eq!(table.page()[0].id, 1);
    }

    #[test]
    fn test_multi_sort_primary_first() {
        let rows = roster();
        let mut table = DataTable::new(employee_columns(), &rows).with_page_size(20);
        table.set_sort(vec![SortKey::asc("department"), SortKey::desc("name")]);

        let page = table.page();
        let depts: Vec<&str> = page.iter().map(|e| e.department).collect();
        assert_eq!(&depts[..2], &["Billing", "Billing"]);
        assert_eq!(page[0].name, "Zoe Adams");
        assert_eq!(page[1].name, "Ravi Kumar");
    }

    #[test]
    fn test_sort_mixed_kind_json_column() {
        // Codes arrive as numbers in some records and as text in others.
        let mut seed: u64 = 7;
        let rows: Vec<serde_json::Value> = (0..2000)
            .map(|i| {
                seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                let n = (seed >> 33) % 500;
                match i % 3 {
                    0 => serde_json::json!({ "code": n }),
                    1 => serde_json::json!({ "code": n.to_string() }),
                    _ => serde_json::json!({ "code": format!("A{n}") }),
                }
            })
            .collect();
        let columns = vec![ColumnDef::key_path("code", "Code", "code")];
        let mut sort = SortState::new();
        sort.set(vec![SortKey::asc("code")]);

        let everything = Paginator::new().page_size(rows.len());
        let page = derive(&rows, &columns, &FilterState::new(), &sort, &everything);
        assert_eq!(page.len(), rows.len());

        let values: Vec<Value> = page.iter().map(|r| Value::from(&r["code"])).collect();
        let first_text = values
            .iter()
            .position(|v| matches!(v, Value::Text(_)))
            .unwrap();
        assert!(values[..first_text].iter().all(|v| matches!(v, Value::Int(_))));
        assert!(values[first_text..].iter().all(|v| matches!(v, Value::Text(_))));
        for pair in values.windows(2) {
            assert_ne!(pair[0].compare(&pair[1]), std::cmp::Ordering::Greater);
        }
    }

    #[test]
    fn test_set_sort_drops_unsortable_columns() {
        let rows = roster();
        let columns = employee_columns()
            .into_iter()
            .map(|c| if c.id() == "role" { c.sortable(false) } else { c })
            .collect();
        let mut table = DataTable::new(columns, &rows);
        table.set_sort(vec![SortKey::asc("role"), SortKey::desc("name")]);

        assert_eq!(table.sort().keys(), &[SortKey::desc("name")]);
        let role = table
            .header_cells()
            .into_iter()
            .find(|h| h.column == "role")
            .unwrap();
        assert_eq!(role.direction, None);
    }

    #[test]
    fn test_toggle_replaces_position_only() {
        let rows = roster();
        let mut table = DataTable::new(employee_columns(), &rows);
        table.toggle_sort("department");
        table.toggle_sort("role");
        table.toggle_sort("department");

        let keys = table.sort().keys();
        assert_eq!(keys[0], SortKey::desc("department"));
        assert_eq!(keys[1], SortKey::asc("role"));
    }
}

mod pagination_tests {
    use super::*;

    fn numbered(n: u32) -> Vec<Employee> {
        (0..n)
            .map(|id| Employee {
                id,
                name: if id < 5 { "keep" } else { "drop" },
                department: "Ops",
                role: "Clerk",
            })
            .collect()
    }

    #[test]
    fn test_pagination_clamping() {
        let rows = numbered(25);
        let mut table = DataTable::new(employee_columns(), &rows).with_page_size(10);
        assert!(table.go_to(2));
        assert_eq!(table.paginator().total_pages(), 3);

        table.set_global_query("keep");
        assert_eq!(table.filtered_count(), 5);
        assert_eq!(table.paginator().page_index(), 0);
        assert_eq!(ids(&table.page()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_total_pages_floor() {
        let rows: Vec<Employee> = Vec::new();
        let table = DataTable::new(employee_columns(), &rows);
        assert_eq!(table.paginator().total_pages(), 1);
        assert!(table.page().is_empty());
    }

    #[test]
    fn test_set_page_size_resets_offset() {
        let rows = numbered(30);
        let mut table = DataTable::new(employee_columns(), &rows).with_page_size(5);
        assert!(table.go_to(3));
        assert_eq!(table.paginator().page_index(), 3);

        table.set_page_size(10);
        assert_eq!(table.paginator().page_index(), 0);
        assert_eq!(ids(&table.page()), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_go_to_out_of_range_is_silent() {
        let rows = numbered(25);
        let mut table = DataTable::new(employee_columns(), &rows);
        table.go_to(1);
        assert!(!table.go_to(7));
        assert_eq!(table.paginator().page_index(), 1);
    }

    #[test]
    fn test_navigation() {
        let rows = numbered(25);
        let mut table = DataTable::new(employee_columns(), &rows);
        table.last_page();
        assert_eq!(ids(&table.page()), (20..25).collect::<Vec<_>>());
        table.prev_page();
        assert_eq!(table.paginator().page_index(), 1);
        table.first_page();
        assert!(!table.prev_page());
        assert!(table.next_page());
        assert_eq!(table.paginator().page_index(), 1);
    }
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_hr_john_end_to_end() {
        let rows = roster();
        let mut table = DataTable::new(employee_columns(), &rows).with_page_size(10);

        table.set_column_filter("department", "HR");
        assert_eq!(table.filtered_count(), 4);

        table.set_global_query("john");
        let page = table.page();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "John Smith");
    }

    #[test]
    fn test_render_shows_page() {
        let rows = roster();
        let mut table = DataTable::new(employee_columns(), &rows).with_page_size(5);
        table.set_column_filter("department", "icu");
        let out = table.render();

        assert!(out.contains("Peter Jones"));
        assert!(out.contains("Olga Ivanova"));
        assert!(!out.contains("John Smith"));
        assert!(out.contains("Showing 1–3 of 3"));
    }

    #[test]
    fn test_derive_matches_table() {
        let rows = roster();
        let columns = employee_columns();
        let mut filters = FilterState::new();
        filters.set_column_filter("department", "fleet");
        let mut sort = SortState::new();
        sort.toggle("name");

        let page = derive(&rows, &columns, &filters, &sort, &Paginator::new());
        let names: Vec<&str> = page.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Elton John", "Johnny Park", "Sara Lee"]);
    }
}
