//! Tests for the three quantifier shapes and the shared counting rule.

use pretty_assertions::assert_eq;

use quarry_ir::{BinaryOp, Expr, ExprArena, ExprId, Iterable, StringId};

use super::{undefined_expr, Fixture};
use crate::quantifier::quota_met;
use crate::value::Value;
use crate::variables::VarValue;

#[test]
fn quota_rule() {
    // needed == 0 means all
    assert_eq!(quota_met(Value::Int(0), 3, 3), Value::TRUE);
    assert_eq!(quota_met(Value::Int(0), 3, 2), Value::FALSE);
    // plain threshold
    assert_eq!(quota_met(Value::Int(2), 3, 2), Value::TRUE);
    assert_eq!(quota_met(Value::Int(2), 3, 0), Value::FALSE);
    // satisfied above needed still passes
    assert_eq!(quota_met(Value::Int(1), 3, 3), Value::TRUE);
    // unsatisfiable needed counts
    assert_eq!(quota_met(Value::Undef, 3, 3), Value::FALSE);
    assert_eq!(quota_met(Value::Int(-1), 3, 3), Value::FALSE);
    // empty chain: "all of nothing" holds
    assert_eq!(quota_met(Value::Int(0), 0, 0), Value::TRUE);
}

/// Three declared strings; `found` picks how many get a match.
fn fixture_with_strings(found: usize) -> (Fixture, Vec<StringId>) {
    let mut fixture = Fixture::new();
    let ids: Vec<StringId> = (0..3)
        .map(|i| fixture.strings.declare(format!("$s{i}")))
        .collect();
    for &id in ids.iter().take(found) {
        fixture.strings.get_mut(id).unwrap().add_match(10);
    }
    (fixture, ids)
}

fn of_found(exprs: &mut ExprArena, needed: ExprId, ids: &[StringId]) -> ExprId {
    let terms = ids
        .iter()
        .map(|&id| exprs.alloc(Expr::StringFound(Some(id))))
        .collect();
    exprs.alloc(Expr::Of { needed, terms })
}

#[test]
fn of_quantifier_threshold() {
    let (fixture, ids) = fixture_with_strings(0);
    let mut exprs = ExprArena::new();
    let needed = exprs.constant(2);
    let of = of_found(&mut exprs, needed, &ids);
    assert_eq!(fixture.eval(&exprs, of), Ok(Value::FALSE));

    let (fixture, ids) = fixture_with_strings(2);
    let mut exprs = ExprArena::new();
    let needed = exprs.constant(2);
    let of = of_found(&mut exprs, needed, &ids);
    assert_eq!(fixture.eval(&exprs, of), Ok(Value::TRUE));
}

#[test]
fn of_with_zero_needed_means_all() {
    let (fixture, ids) = fixture_with_strings(3);
    let mut exprs = ExprArena::new();
    let needed = exprs.constant(0);
    let of = of_found(&mut exprs, needed, &ids);
    assert_eq!(fixture.eval(&exprs, of), Ok(Value::TRUE));

    let (fixture, ids) = fixture_with_strings(2);
    let mut exprs = ExprArena::new();
    let needed = exprs.constant(0);
    let of = of_found(&mut exprs, needed, &ids);
    assert_eq!(fixture.eval(&exprs, of), Ok(Value::FALSE));
}

#[test]
fn of_zero_needed_equals_conjunction() {
    for found in 0..=3 {
        let (fixture, ids) = fixture_with_strings(found);
        let mut exprs = ExprArena::new();

        let needed = exprs.constant(0);
        let of = of_found(&mut exprs, needed, &ids);

        let mut conjunction = exprs.alloc(Expr::StringFound(Some(ids[0])));
        for &id in &ids[1..] {
            let next = exprs.alloc(Expr::StringFound(Some(id)));
            conjunction = exprs.and(conjunction, next);
        }

        assert_eq!(
            fixture.eval(&exprs, of),
            fixture.eval(&exprs, conjunction),
            "found={found}"
        );
    }
}

#[test]
fn of_counts_undefined_terms_as_satisfied() {
    // Inherited truthiness: an undefined term body counts
    let fixture = Fixture::new();
    let mut exprs = ExprArena::new();
    let needed = exprs.constant(1);
    let term = undefined_expr(&mut exprs);
    let of = exprs.alloc(Expr::Of {
        needed,
        terms: vec![term],
    });
    assert_eq!(fixture.eval(&exprs, of), Ok(Value::TRUE));
}

#[test]
fn of_preserves_chain_duplicates() {
    // The same found string listed twice satisfies needed == 2
    let (fixture, ids) = fixture_with_strings(1);
    let mut exprs = ExprArena::new();
    let needed = exprs.constant(2);
    let of = of_found(&mut exprs, needed, &[ids[0], ids[0]]);
    assert_eq!(fixture.eval(&exprs, of), Ok(Value::TRUE));
}

#[test]
fn for_strings_binds_anonymous_string() {
    let (fixture, ids) = fixture_with_strings(2);
    let mut exprs = ExprArena::new();

    // for all of ($s0, $s1, $s2) : ($)
    let needed = exprs.constant(0);
    let body = exprs.alloc(Expr::StringFound(None));
    let for_all = exprs.alloc(Expr::ForStrings {
        needed,
        strings: ids.clone(),
        body,
    });
    assert_eq!(fixture.eval(&exprs, for_all), Ok(Value::FALSE));

    // for 2 of them : ($)
    let needed = exprs.constant(2);
    let for_two = exprs.alloc(Expr::ForStrings {
        needed,
        strings: ids,
        body,
    });
    assert_eq!(fixture.eval(&exprs, for_two), Ok(Value::TRUE));
}

#[test]
fn for_strings_restores_binding_around_nested_quantifier() {
    // $outer has two matches, $inner one. The outer body runs an inner
    // for-strings quantifier and then counts the anonymous string's
    // matches: if the inner binding leaked, the count would be 1.
    let mut fixture = Fixture::new();
    let outer = fixture.strings.declare("$outer");
    let inner = fixture.strings.declare("$inner");
    {
        let pattern = fixture.strings.get_mut(outer).unwrap();
        pattern.add_match(1);
        pattern.add_match(2);
    }
    fixture.strings.get_mut(inner).unwrap().add_match(9);

    let mut exprs = ExprArena::new();
    let one = exprs.constant(1);
    let inner_body = exprs.alloc(Expr::StringFound(None));
    let inner_for = exprs.alloc(Expr::ForStrings {
        needed: one,
        strings: vec![inner],
        body: inner_body,
    });

    let anon_count = exprs.alloc(Expr::StringCount(None));
    let two = exprs.constant(2);
    let count_is_two = exprs.binary(BinaryOp::Eq, anon_count, two);
    let outer_body = exprs.and(inner_for, count_is_two);

    let needed = exprs.constant(0);
    let outer_for = exprs.alloc(Expr::ForStrings {
        needed,
        strings: vec![outer],
        body: outer_body,
    });

    assert_eq!(fixture.eval(&exprs, outer_for), Ok(Value::TRUE));
}

#[test]
fn for_iterable_over_range() {
    // for all i in (1..5) : (i > 0) and for 3 i in (1..5) : (i >= 3)
    let mut fixture = Fixture::new();
    let i = fixture.variables.declare("i", VarValue::Int(0));

    let mut exprs = ExprArena::new();
    let min = exprs.constant(1);
    let max = exprs.constant(5);
    let zero = exprs.constant(0);
    let var = exprs.alloc(Expr::Variable(i));
    let positive = exprs.binary(BinaryOp::Gt, var, zero);
    let needed = exprs.constant(0);
    let all_positive = exprs.alloc(Expr::ForIterable {
        needed,
        var: i,
        iterable: Iterable::Range { min, max },
        body: positive,
    });
    assert_eq!(fixture.eval(&exprs, all_positive), Ok(Value::TRUE));

    let three = exprs.constant(3);
    let var = exprs.alloc(Expr::Variable(i));
    let at_least_three = exprs.binary(BinaryOp::GtEq, var, three);
    let needed = exprs.constant(3);
    let three_of = exprs.alloc(Expr::ForIterable {
        needed,
        var: i,
        iterable: Iterable::Range { min, max },
        body: at_least_three,
    });
    assert_eq!(fixture.eval(&exprs, three_of), Ok(Value::TRUE));

    let needed = exprs.constant(4);
    let four_of = exprs.alloc(Expr::ForIterable {
        needed,
        var: i,
        iterable: Iterable::Range { min, max },
        body: at_least_three,
    });
    assert_eq!(fixture.eval(&exprs, four_of), Ok(Value::FALSE));
}

#[test]
fn for_iterable_with_undefined_range_bound_is_false() {
    let mut fixture = Fixture::new();
    let i = fixture.variables.declare("i", VarValue::Int(0));

    let mut exprs = ExprArena::new();
    let min = exprs.constant(1);
    let max = undefined_expr(&mut exprs);
    let body = exprs.constant(1);
    let needed = exprs.constant(0);
    let quantifier = exprs.alloc(Expr::ForIterable {
        needed,
        var: i,
        iterable: Iterable::Range { min, max },
        body,
    });

    assert_eq!(fixture.eval(&exprs, quantifier), Ok(Value::FALSE));
}

#[test]
fn for_iterable_over_explicit_set() {
    // for all i in (2, 4, 6) : (i % 2 == 0)
    let mut fixture = Fixture::new();
    let i = fixture.variables.declare("i", VarValue::Int(0));

    let mut exprs = ExprArena::new();
    let items = vec![exprs.constant(2), exprs.constant(4), exprs.constant(6)];
    let var = exprs.alloc(Expr::Variable(i));
    let two = exprs.constant(2);
    let zero = exprs.constant(0);
    let rem = exprs.binary(BinaryOp::Mod, var, two);
    let even = exprs.binary(BinaryOp::Eq, rem, zero);
    let needed = exprs.constant(0);
    let quantifier = exprs.alloc(Expr::ForIterable {
        needed,
        var: i,
        iterable: Iterable::Set(items),
        body: even,
    });

    assert_eq!(fixture.eval(&exprs, quantifier), Ok(Value::TRUE));
}

#[test]
fn for_iterable_skips_undefined_set_members() {
    // An undefined member produces no binding and no satisfaction slot
    let mut fixture = Fixture::new();
    let i = fixture.variables.declare("i", VarValue::Int(0));

    let mut exprs = ExprArena::new();
    let defined = exprs.constant(1);
    let undefined = undefined_expr(&mut exprs);
    let body = exprs.constant(1);
    let needed = exprs.constant(0);
    let quantifier = exprs.alloc(Expr::ForIterable {
        needed,
        var: i,
        iterable: Iterable::Set(vec![defined, undefined]),
        body,
    });

    assert_eq!(fixture.eval(&exprs, quantifier), Ok(Value::TRUE));
}

#[test]
fn nested_iterable_quantifiers_over_the_same_variable() {
    // Inner binding shadows during its body and unwinds afterwards:
    // for all i in (1..1) : ((for all i in (5..5) : (i == 5)) and i == 1)
    let mut fixture = Fixture::new();
    let i = fixture.variables.declare("i", VarValue::Int(0));

    let mut exprs = ExprArena::new();
    let five = exprs.constant(5);
    let var = exprs.alloc(Expr::Variable(i));
    let inner_check = exprs.binary(BinaryOp::Eq, var, five);
    let needed = exprs.constant(0);
    let inner = exprs.alloc(Expr::ForIterable {
        needed,
        var: i,
        iterable: Iterable::Range {
            min: five,
            max: five,
        },
        body: inner_check,
    });

    let one = exprs.constant(1);
    let var = exprs.alloc(Expr::Variable(i));
    let outer_check = exprs.binary(BinaryOp::Eq, var, one);
    let outer_body = exprs.and(inner, outer_check);
    let needed = exprs.constant(0);
    let outer = exprs.alloc(Expr::ForIterable {
        needed,
        var: i,
        iterable: Iterable::Range { min: one, max: one },
        body: outer_body,
    });

    assert_eq!(fixture.eval(&exprs, outer), Ok(Value::TRUE));
}

#[test]
fn needed_count_is_evaluated_before_iteration() {
    // A needed count reading the loop variable sees the slot value,
    // not a binding from the iteration it gates
    let mut fixture = Fixture::new();
    let i = fixture.variables.declare("i", VarValue::Int(2));

    let mut exprs = ExprArena::new();
    let needed = exprs.alloc(Expr::Variable(i));
    let one = exprs.constant(1);
    let three = exprs.constant(3);
    let body = exprs.constant(1);
    let quantifier = exprs.alloc(Expr::ForIterable {
        needed,
        var: i,
        iterable: Iterable::Range {
            min: one,
            max: three,
        },
        body,
    });

    // needed = 2, three satisfied iterations
    assert_eq!(fixture.eval(&exprs, quantifier), Ok(Value::TRUE));
}
