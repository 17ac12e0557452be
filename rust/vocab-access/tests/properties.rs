//! Algebraic properties of permission sets, language coverage and role
//! subsumption.
mod properties {
    use proptest::prelude::*;
    use proptest::sample::{Index, subsequence};
    use vocab_access::evaluator::{evaluate, qualifier_covers};
    use vocab_access::{
        Capability, CapabilityStore, Domain, Goal, LanguageSet, Permission, Permissions, Qualifier,
        Role, Subject, Topic, subsumes,
    };

    const TAGS: [&str; 6] = ["en", "it", "fr", "de", "es", "pt"];

    fn permissions() -> impl Strategy<Value = Permissions> {
        subsequence(Permission::ALL.to_vec(), 1..=5)
            .prop_map(|letters| letters.into_iter().collect::<Permissions>())
    }

    fn languages() -> impl Strategy<Value = LanguageSet> {
        subsequence(TAGS.to_vec(), 1..=TAGS.len())
            .prop_map(|tags| tags.join(",").parse::<LanguageSet>().expect("tags are non-empty"))
    }

    fn role() -> impl Strategy<Value = Role> {
        prop_oneof![
            proptest::sample::select(Role::NAMED.to_vec()),
            languages().prop_map(|languages| Role::XLabel(Some(languages))),
        ]
    }

    fn on(subject: Role) -> Topic {
        Topic::Subject {
            domain: Domain::Rdf,
            subject: Subject::Role(subject),
        }
    }

    proptest! {
        #[test]
        fn granted_letters_authorize_exactly_their_subsets(
            granted in permissions(),
            requested in permissions(),
        ) {
            let store = CapabilityStore::parse([
                format!(r#"capability(rdf(concept), "{granted}")."#),
            ]).expect("valid capability");
            let goal = Goal::new(on(Role::Concept), requested);
            prop_assert_eq!(evaluate(&goal, &store), requested.is_subset_of(&granted));
        }

        #[test]
        fn language_coverage_is_subset(granted in languages(), requested in languages()) {
            let covered = qualifier_covers(
                &Qualifier::Lexicalization(Some(granted.clone())),
                &Qualifier::Lexicalization(Some(requested.clone())),
            );
            prop_assert_eq!(covered, requested.is_subset(&granted));
            prop_assert!(qualifier_covers(
                &Qualifier::Lexicalization(None),
                &Qualifier::Lexicalization(Some(requested)),
            ));
        }

        #[test]
        fn language_order_does_not_matter(tags in subsequence(TAGS.to_vec(), 1..=TAGS.len())) {
            let forward: LanguageSet = tags.join(",").parse().expect("valid list");
            let mut reversed_tags = tags.clone();
            reversed_tags.reverse();
            let reversed: LanguageSet = reversed_tags.join(" , ").parse().expect("valid list");
            prop_assert_eq!(forward, reversed);
        }

        #[test]
        fn subsumption_is_reflexive_and_topped_by_resource(role in role()) {
            prop_assert!(subsumes(&role, &role));
            prop_assert!(subsumes(&Role::Resource, &role));
        }

        #[test]
        fn subsumption_is_transitive(a in role(), b in role(), c in role()) {
            if subsumes(&a, &b) && subsumes(&b, &c) {
                prop_assert!(subsumes(&a, &c));
            }
        }

        #[test]
        fn general_grants_cover_what_specific_grants_cover(
            specific in role(),
            pick in any::<Index>(),
            requested in role(),
            letters in permissions(),
        ) {
            let ancestry: Vec<Role> = specific.ancestry().collect();
            let general = pick.get(&ancestry).clone();
            prop_assert!(subsumes(&general, &specific));
            let grant = |role: &Role| {
                CapabilityStore::load([Capability::new(on(role.clone()), letters)])
            };
            let goal = Goal::new(on(requested), letters);
            if evaluate(&goal, &grant(&specific)) {
                prop_assert!(evaluate(&goal, &grant(&general)));
            }
        }
    }
}
