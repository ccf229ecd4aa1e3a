#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use ezstate_core::{Host, HostError, render_hook};

    use crate::*;

    type Counters = BTreeMap<String, i64>;

    fn counters(pairs: &[(&str, i64)]) -> Counters {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn patch_resolve() {
        let cur = counters(&[("a", 1)]);
        let p: Patch<Counters> = Patch::partial(counters(&[("b", 2)]));
        assert_eq!(p.resolve(&cur), counters(&[("b", 2)]));

        let p: Patch<Counters> = Patch::derive(|s: &Counters| counters(&[("a", s["a"] * 10)]));
        assert_eq!(p.resolve(&cur), counters(&[("a", 10)]));
        assert_eq!(format!("{:?}", Patch::<Counters>::derive(|_| Counters::new())), "Derive(..)");
    }

    #[test]
    fn policy_from_closure() {
        let policy: MergePolicy<Counters> = (|cur: &Counters, patch: Counters| {
            let mut next = cur.clone();
            for (k, v) in patch {
                *next.entry(k).or_default() += v;
            }
            next
        })
        .into();
        let next = policy.apply(&counters(&[("a", 1)]), counters(&[("a", 2), ("b", 3)]));
        assert_eq!(next, counters(&[("a", 3), ("b", 3)]));

        let copy = policy.clone();
        assert!(copy.ptr_eq(&policy));
        assert!(!MergePolicy::<Counters>::shallow().ptr_eq(&policy));
    }

    #[test]
    fn default_policy_is_shallow() {
        let policy = MergePolicy::<Counters>::default();
        let next = policy.apply(&counters(&[("a", 1), ("b", 2)]), counters(&[("b", 5)]));
        assert_eq!(next, counters(&[("a", 1), ("b", 5)]));
    }

    #[test]
    fn update_does_not_render_by_itself() {
        let mut host = Host::new();
        let (_, update, _) = host
            .render(|| use_ez_state(counters(&[("a", 1)]), None))
            .unwrap();
        update.merge(counters(&[("a", 2)]));
        assert!(host.is_dirty());

        let (state, update2, _) = host
            .render(|| use_ez_state(counters(&[("a", 1)]), None))
            .unwrap();
        assert_eq!(state, counters(&[("a", 2)]));
        assert_eq!(update, update2);
    }

    #[test]
    fn reset_is_idempotent_and_skips_rerender() {
        let mut h = render_hook((), |_| use_ez_state(counters(&[("n", 0)]), None));

        h.act(|(_, _, reset)| reset.reset());
        assert_eq!(h.render_count(), 1);

        h.act(|(_, update, _)| update.merge(counters(&[("n", 4)])));
        assert_eq!(h.render_count(), 2);

        h.act(|(_, _, reset)| {
            reset.reset();
            reset.reset();
        });
        assert_eq!(h.result().0, counters(&[("n", 0)]));
        assert_eq!(h.render_count(), 3);

        h.act(|(_, _, reset)| reset.reset());
        assert_eq!(h.render_count(), 3);
    }

    #[test]
    fn panicking_derive_leaves_state_unchanged() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut h = render_hook((), |_| use_ez_state(counters(&[("n", 1)]), None));

        let err = h.try_act(|(_, update, _)| {
            update.derive(|_| panic!("bad patch"));
        });
        assert_eq!(
            err,
            Err(HostError::Panicked {
                message: "bad patch".into()
            })
        );
        assert_eq!(h.result().0, counters(&[("n", 1)]));
        assert_eq!(h.render_count(), 1);
    }

    #[test]
    fn policy_is_read_when_update_runs() {
        let calls = Rc::new(Cell::new(0));
        let mut host = Host::new();

        let c = calls.clone();
        let (_, update, _) = host
            .render(|| {
                use_ez_state_with(counters(&[]), move |cur: &Counters, p: Counters| {
                    c.set(c.get() + 1);
                    cur.shallow_merge(p)
                })
            })
            .unwrap();

        // New policy installed by a render that happens after `update` was obtained.
        host.render(|| {
            use_ez_state_with(counters(&[]), |_: &Counters, _: Counters| counters(&[("late", 1)]))
        })
        .unwrap();

        update.merge(counters(&[("x", 1)]));
        assert_eq!(calls.get(), 0);
        let (state, _, _) = host.render(|| use_ez_state(counters(&[]), None)).unwrap();
        // That last render restored the default policy; the update above
        // already ran under the "late" one.
        assert_eq!(state, counters(&[("late", 1)]));
    }

    #[test]
    fn updates_after_unmount_are_ignored() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut h = render_hook((), |_| use_ez_state(counters(&[("n", 1)]), None));
        let (_, update, reset) = h.result().clone();
        h.unmount();
        update.merge(counters(&[("n", 2)]));
        reset.reset();
        assert_eq!(h.result().0, counters(&[("n", 1)]));
    }

    #[test]
    fn update_from_invalidation_callback() {
        let mut host = Host::new();
        let (_, update, _) = host
            .render(|| use_ez_state(counters(&[]), None))
            .unwrap();

        let echoed = Rc::new(Cell::new(false));
        let (u, e) = (update.clone(), echoed.clone());
        host.on_invalidate(move || {
            if !e.replace(true) {
                u.merge(counters(&[("echo", 1)]));
            }
        });

        update.merge(counters(&[("a", 1)]));
        assert!(host.is_dirty());

        let (state, _, _) = host
            .render(|| use_ez_state(counters(&[]), None))
            .unwrap();
        assert_eq!(state, counters(&[("a", 1), ("echo", 1)]));
    }

    #[test]
    fn nested_update_inside_derive_is_overwritten() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut h = render_hook((), |_| use_ez_state(counters(&[("a", 0)]), None));

        h.act(|(_, update, _)| {
            let inner = update.clone();
            update.derive(move |_| {
                inner.merge(counters(&[("b", 1)]));
                counters(&[("a", 1)])
            });
        });
        assert_eq!(h.result().0, counters(&[("a", 1)]));

        // The in-progress flag is cleared again; plain updates still land.
        h.act(|(_, update, _)| update.merge(counters(&[("c", 2)])));
        assert_eq!(h.result().0, counters(&[("a", 1), ("c", 2)]));
    }
}
