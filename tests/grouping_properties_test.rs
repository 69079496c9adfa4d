// ==========================================
// 그룹화 / 공정 순서 편집 성질 테스트
// ==========================================


use estimate_sections::domain::{EstimateDraft, GroupKey, LineItem};
use estimate_sections::engine::{GroupingEngine, GroupingOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_helpers::{item, sample_items, sample_order};

const NAMES: [&str; 5] = ["가설철거", "목공", "도배", "전기", "설비"];

fn random_case(rng: &mut StdRng) -> (Vec<LineItem>, Vec<GroupKey>) {
    let count = rng.random_range(0..12);
    let items = (0..count)
        .map(|i| {
            let group = NAMES[rng.random_range(0..NAMES.len())];
            item(group, &format!("항목{}", i), rng.random_range(0..3), 1000, 0)
        })
        .collect();
    // 순서에는 일부 공정만 넣는다 (나머지는 맨 뒤 묶음)
    let order = NAMES
        .iter()
        .take(rng.random_range(0..4))
        .map(|n| GroupKey::named(*n))
        .collect();
    (items, order)
}

#[test]
fn test_random_inputs_preserve_intra_group_order_and_trailing_bucket() {
    let engine = GroupingEngine::new();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let (items, order) = random_case(&mut rng);
        let before = items.clone();
        let groups = engine.group_for_display(&items, &order, GroupingOptions::editing());

        // 모든 항목이 정확히 한 번씩
        let total: usize = groups.iter().map(|g| g.rows.len()).sum();
        assert_eq!(total, items.len());

        // 공정 안에서는 원래 위치 순
        for group in &groups {
            let positions: Vec<usize> = group.rows.iter().map(|r| r.source_index).collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            let seqs: Vec<usize> = group.rows.iter().map(|r| r.seq).collect();
            assert_eq!(seqs, (1..=group.rows.len()).collect::<Vec<_>>());
        }

        // 순서에 없는 공정은 있는 공정 뒤, 서로는 원래 위치 순
        let flat: Vec<usize> = groups
            .iter()
            .flat_map(|g| g.rows.iter().map(|r| r.source_index))
            .collect();
        let first_unmatched = flat.iter().position(|&i| !order.contains(&items[i].group_key));
        if let Some(start) = first_unmatched {
            assert!(flat[start..].iter().all(|&i| !order.contains(&items[i].group_key)));
            assert!(flat[start..].windows(2).all(|w| w[0] < w[1]));
        }

        assert_eq!(items, before);
    }
}

#[test]
fn test_random_inputs_print_projection_filters_zero_quantity() {
    let engine = GroupingEngine::new();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let (items, order) = random_case(&mut rng);
        let groups = engine.group_for_display(&items, &order, GroupingOptions::print());

        for group in &groups {
            assert!(!group.rows.is_empty());
            assert!(group.rows.iter().all(|r| r.item.quantity > 0));
        }
        let visible: usize = groups.iter().map(|g| g.rows.len()).sum();
        assert_eq!(visible, items.iter().filter(|i| i.quantity > 0).count());
    }
}

#[test]
fn test_scenario_blank_group_with_zero_quantity() {
    let items = vec![item("", "도배", 2, 0, 0), item("", "바닥", 0, 0, 0)];
    let engine = GroupingEngine::new();

    let all = engine.group_for_display(&items, &[], GroupingOptions::editing());
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].display_name, "");
    assert_eq!(all[0].rows.len(), 2);

    let printed = engine.group_for_display(&items, &[], GroupingOptions::print());
    assert_eq!(printed.len(), 1);
    assert_eq!(printed[0].rows.len(), 1);
    assert_eq!(printed[0].rows[0].item.category, "도배");
}

#[test]
fn test_rename_into_existing_group_merges() {
    let items = vec![
        item("A", "a1", 1, 0, 0),
        item("B", "b1", 1, 0, 0),
        item("A", "a2", 1, 0, 0),
        item("B", "b2", 1, 0, 0),
    ];
    let mut draft = EstimateDraft::from_parts(items, vec![GroupKey::named("A"), GroupKey::named("B")]);

    draft.rename_group(&GroupKey::named("B"), "A");
    assert_eq!(draft.order, vec![GroupKey::named("A")]);

    let groups = draft.display_groups(GroupingOptions::editing());
    assert_eq!(groups.len(), 1);
    let names: Vec<&str> = groups[0].rows.iter().map(|r| r.item.category.as_str()).collect();
    assert_eq!(names, vec!["a1", "b1", "a2", "b2"]);
}

#[test]
fn test_move_and_rename_session_flow() {
    let mut draft = EstimateDraft::from_parts(sample_items(), sample_order());

    assert!(draft.move_down(0));
    assert!(!draft.move_down(2));
    assert!(!draft.move_up(0));
    assert_eq!(draft.order[0], GroupKey::named("목공"));

    let section = draft.append_new_section();
    let index = draft.append_item_to_group(&section);
    assert_eq!(draft.items[index].group_key, section);

    let renamed = draft.rename_group(&section, " 청소 ");
    assert_eq!(renamed, GroupKey::named("청소"));
    assert_eq!(draft.order.last(), Some(&renamed));
    assert_eq!(draft.items.iter().filter(|i| i.group_key == renamed).count(), 2);

    let groups = draft.display_groups(GroupingOptions::editing());
    let names: Vec<&str> = groups.iter().map(|g| g.display_name).collect();
    assert_eq!(names, vec!["목공", "가설철거", "도배", "청소"]);
}

#[test]
fn test_totals_and_subtotals() {
    let draft = EstimateDraft::from_parts(sample_items(), sample_order());
    let totals = draft.totals();

    // 목공 60,000+40,000 / 90,000+60,000, 가설철거 10,000+5,000 / 150,000
    assert_eq!(totals.material, 60_000 + 90_000 + 10_000);
    assert_eq!(totals.labor, 40_000 + 60_000 + 5_000 + 150_000);
    assert_eq!(totals.supply, totals.material + totals.labor);
    assert_eq!(totals.vat, totals.supply / 10);
    assert_eq!(totals.total, totals.supply + totals.vat);

    let groups = draft.display_groups(GroupingOptions::print());
    let sum: u64 = groups.iter().map(|g| g.subtotal().supply).sum();
    assert_eq!(sum, totals.supply);
}
