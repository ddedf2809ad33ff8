use rpmtree_solve::{CandidateSelection, MinimalUnsatSubset, ResolveError, Resolver, SatSolver};
use rpmtree_types::{ComparisonFlag, Entry, Package};

mod helpers;

use helpers::PackageBuilder;

/// The identities of the installed and the excluded packages.
#[derive(Debug, Eq, PartialEq)]
struct Outcome {
    install: Vec<String>,
    excluded: Vec<String>,
}

fn resolve<S: SatSolver + Default>(
    packages: &[Package],
    selection: CandidateSelection,
    names: &[&str],
) -> Result<Outcome, ResolveError> {
    let mut resolver = Resolver::with_solver(S::default(), selection);
    resolver.load_involved_packages(packages);
    resolver.construct_requirements(names)?;
    let resolution = resolver.resolve()?;

    let identities = |packages: Vec<&Package>| packages.iter().map(|p| p.to_string()).collect();
    Ok(Outcome {
        install: identities(resolution.install),
        excluded: identities(resolution.excluded),
    })
}

fn explain<S: SatSolver + Default>(
    packages: &[Package],
    names: &[&str],
) -> Result<MinimalUnsatSubset, ResolveError> {
    let mut resolver = Resolver::with_solver(S::default(), CandidateSelection::BestOnly);
    resolver.load_involved_packages(packages);
    resolver.construct_requirements(names)?;
    resolver.explain_unsatisfiable()
}

/// A pool where `testa` needs `testc` and `testd` through capabilities, and `testd` needs
/// `teste`. Nothing needs `testb`.
fn indirect_pool() -> Vec<Package> {
    vec![
        PackageBuilder::new("testa")
            .provides(["testa", "a", "b"])
            .requires(["d", "g"])
            .build(),
        PackageBuilder::new("testb").provides(["testb", "c"]).build(),
        PackageBuilder::new("testc").provides(["testc", "d"]).build(),
        PackageBuilder::new("testd")
            .provides(["testd", "e", "f", "g"])
            .requires(["h"])
            .build(),
        PackageBuilder::new("teste").provides(["teste", "h"]).build(),
    ]
}

/// `testa` needs `testb` and `testc`, which conflict with each other.
fn conflicting_pool() -> Vec<Package> {
    vec![
        PackageBuilder::new("testa")
            .requires(["testb", "testc"])
            .build(),
        PackageBuilder::new("testb").conflicts(["testc"]).build(),
        PackageBuilder::new("testc").build(),
    ]
}

fn two_versions_pool(requirement: &'static str) -> Vec<Package> {
    vec![
        PackageBuilder::new("testa").requires([requirement]).build(),
        PackageBuilder::new("testb").provides(["d"]).build(),
        PackageBuilder::new("testb")
            .version("2")
            .provides(["d"])
            .build(),
    ]
}

/// `testa` needs `testb` and `testc` at different versions of `testb`, both are candidates.
fn versioned_pool() -> Vec<Package> {
    vec![
        PackageBuilder::new("testa")
            .requires(["testb >= 2", "testc"])
            .build(),
        PackageBuilder::new("testb")
            .version("1-3.fc32")
            .provides(["d = 1"])
            .build(),
        PackageBuilder::new("testb")
            .version("2-1.fc32")
            .provides(["d = 2"])
            .build(),
        PackageBuilder::new("testc")
            .requires(["testb < 2", "d <= 1-3.fc32"])
            .build(),
    ]
}

/// Returns true if `provide` satisfies `requirement` under the RPM comparison rules.
fn provide_matches(provide: &Entry, requirement: &Entry) -> bool {
    if provide.name != requirement.name {
        return false;
    }
    if requirement.flag == ComparisonFlag::None {
        return true;
    }
    let provided = if requirement.version.has_release() {
        provide.version.clone()
    } else {
        provide.version.without_release()
    };
    provided.is_empty() || requirement.flag.matches(provided.cmp(&requirement.version))
}

/// Asserts that every requirement of an installed package is met by an installed package.
fn assert_requirements_satisfied(pool: &[Package], outcome: &Outcome) {
    let installed = pool
        .iter()
        .filter(|p| outcome.install.contains(&p.to_string()))
        .collect::<Vec<_>>();
    assert_eq!(installed.len(), outcome.install.len());

    for package in &installed {
        for requirement in &package.requires {
            assert!(
                installed.iter().any(|p| p
                    .provides
                    .iter()
                    .any(|provide| provide_matches(provide, requirement))
                    || p.files.contains(&requirement.name)),
                "{package} requires {requirement}, which nothing installed provides"
            );
        }
    }
}

const JSON_POOL: &str = r#"[
    { "name": "testa", "version": "1", "provides": ["testa = 1"], "requires": ["d >= 2"] },
    {
        "name": "testb",
        "version": "2-1.fc32",
        "provides": ["testb = 2-1.fc32", "d = 2"],
        "files": ["/usr/bin/testb"]
    },
    { "name": "testc", "version": "1", "provides": ["testc = 1", "d = 1"] }
]"#;

macro_rules! resolver_backend_tests {
    ($T:path) => {
        #[test_log::test]
        fn test_resolve_indirect_dependency() {
            let outcome = resolve::<$T>(&indirect_pool(), CandidateSelection::BestOnly, &["testa"])
                .unwrap();
            assert_eq!(
                outcome,
                Outcome {
                    install: vec![
                        "testa-0:1".to_string(),
                        "testc-0:1".to_string(),
                        "testd-0:1".to_string(),
                        "teste-0:1".to_string(),
                    ],
                    excluded: vec!["testb-0:1".to_string()],
                }
            );
        }

        #[test]
        fn test_resolve_circular_dependency() {
            let mut pool = indirect_pool();
            pool[4] = PackageBuilder::new("teste")
                .provides(["teste", "h"])
                .requires(["a"])
                .build();

            let outcome =
                resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap();
            assert_eq!(
                outcome.install,
                vec!["testa-0:1", "testc-0:1", "testd-0:1", "teste-0:1"]
            );
            assert_eq!(outcome.excluded, vec!["testb-0:1"]);
        }

        #[test]
        fn test_resolve_unresolvable_dependency() {
            let pool = vec![PackageBuilder::new("testa")
                .provides(["testa", "a", "b"])
                .requires(["d"])
                .build()];

            let err = resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap_err();
            assert_eq!(
                err.to_string(),
                "cannot satisfy requirements: testa-0:1 requires d"
            );
            assert!(matches!(
                err,
                ResolveError::UnresolvableRequirements(requirements) if requirements.len() == 1
            ));

            let mut resolver = Resolver::with_solver(<$T>::default(), CandidateSelection::BestOnly);
            resolver.load_involved_packages(&pool);
            let unresolvable = resolver.unresolvable_requirements();
            assert_eq!(unresolvable.len(), 1);
            assert_eq!(unresolvable[0].package, "testa-0:1");
            assert_eq!(unresolvable[0].requirement, Entry::unversioned("d"));
        }

        #[test]
        fn test_resolve_two_versions_best_only() {
            let mut pool = two_versions_pool("d");
            pool[0] = PackageBuilder::new("testa")
                .provides(["testa", "a", "b"])
                .requires(["d"])
                .conflicts(["testa", "a"])
                .build();

            let outcome =
                resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap();
            assert_eq!(outcome.install, vec!["testa-0:1", "testb-0:2"]);
            assert!(outcome.excluded.is_empty());
        }

        #[test]
        fn test_resolve_two_versions_picks_one() {
            let pool = two_versions_pool("d");
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::AllVersions, &["testa"]).unwrap();
            assert_eq!(outcome.install.len(), 2);
            assert_eq!(outcome.excluded.len(), 1);
            assert!(outcome.excluded[0].starts_with("testb-"));
        }

        #[test]
        fn test_resolve_self_referencing_package() {
            let pool = vec![PackageBuilder::new("testa").provides(["testa"]).build()];
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap();
            assert_eq!(outcome.install, vec!["testa-0:1"]);
            assert!(outcome.excluded.is_empty());

            let pool = vec![PackageBuilder::new("testa").requires(["testa"]).build()];
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap();
            assert_eq!(outcome.install, vec!["testa-0:1"]);
            assert!(outcome.excluded.is_empty());
        }

        #[test]
        fn test_resolve_ignores_self_conflicts() {
            let pool = vec![PackageBuilder::new("testa")
                .provides(["a"])
                .conflicts(["testa", "a"])
                .build()];
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap();
            assert_eq!(outcome.install, vec!["testa-0:1"]);
        }

        #[test_log::test]
        fn test_resolve_conflict_is_unsatisfiable() {
            let err = resolve::<$T>(&conflicting_pool(), CandidateSelection::BestOnly, &["testa"])
                .unwrap_err();
            assert!(matches!(err, ResolveError::Unsatisfiable));
            assert_eq!(err.to_string(), "no solution found");
        }

        #[test]
        fn test_explain_unsatisfiable() {
            let subset = explain::<$T>(&conflicting_pool(), &["testa"]).unwrap();

            insta::assert_snapshot!(subset.to_string().trim_end(), @r###"
            testa-0:1 requires testb, provided by testb-0:1
            testa-0:1 requires testc, provided by testc-0:1
            testb-0:1 conflicts with testc, provided by testc-0:1
            testa-0:1 was requested
            "###);
            assert_eq!(
                subset
                    .clauses
                    .iter()
                    .map(|clause| clause.literals.clone())
                    .collect::<Vec<_>>(),
                vec![vec![-1, 2], vec![-1, 3], vec![-2, -3], vec![1]]
            );
        }

        #[test]
        fn test_explain_satisfiable() {
            let err = explain::<$T>(&indirect_pool(), &["testa"]).unwrap_err();
            assert!(matches!(err, ResolveError::Satisfiable));
        }

        #[test]
        fn test_resolve_non_best_candidate() {
            let pool = two_versions_pool("testb < 2");
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::AllVersions, &["testa"]).unwrap();
            assert_eq!(outcome.install, vec!["testa-0:1", "testb-0:1"]);
            assert_eq!(outcome.excluded, vec!["testb-0:2"]);

            // Only the newest `testb` takes part, which does not satisfy the requirement.
            let err = resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap_err();
            assert!(matches!(err, ResolveError::UnresolvableRequirements(_)));
        }

        #[test]
        fn test_resolve_versioned_requirement() {
            let pool = two_versions_pool("testb >= 2");
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::AllVersions, &["testa"]).unwrap();
            assert_eq!(outcome.install, vec!["testa-0:1", "testb-0:2"]);
            assert_eq!(outcome.excluded, vec!["testb-0:1"]);
        }

        #[test]
        fn test_resolve_newest_top_level_package() {
            let pool = vec![
                PackageBuilder::new("testa").build(),
                PackageBuilder::new("testa").version("2").build(),
            ];
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::AllVersions, &["testa"]).unwrap();
            assert_eq!(outcome.install, vec!["testa-0:2"]);
            assert_eq!(outcome.excluded, vec!["testa-0:1"]);
        }

        #[test]
        fn test_resolve_file_requirement() {
            let pool = vec![
                PackageBuilder::new("testa")
                    .requires(["/usr/bin/bash"])
                    .build(),
                PackageBuilder::new("bash")
                    .version("5.0.17-1.fc32")
                    .provides(["/bin/sh"])
                    .files(["/usr/bin/bash"])
                    .build(),
            ];
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap();
            assert_eq!(outcome.install, vec!["testa-0:1", "bash-0:5.0.17-1.fc32"]);
        }

        #[test]
        fn test_resolve_unknown_package() {
            let err =
                resolve::<$T>(&indirect_pool(), CandidateSelection::BestOnly, &["testa", "nope"])
                    .unwrap_err();
            assert!(matches!(&err, ResolveError::UnknownPackage(name) if name == "nope"));
            assert_eq!(err.to_string(), "package nope does not exist");
        }

        #[test]
        fn test_resolve_is_reproducible() {
            let pool = indirect_pool();
            let first = resolve::<$T>(&pool, CandidateSelection::AllVersions, &["testa"]).unwrap();
            let second = resolve::<$T>(&pool, CandidateSelection::AllVersions, &["testa"]).unwrap();
            assert_eq!(first, second);
        }

        #[test]
        fn test_installed_requirements_are_satisfied() {
            let pool = indirect_pool();
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap();
            assert_requirements_satisfied(&pool, &outcome);

            let pool = versioned_pool();
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::AllVersions, &["testa"]).unwrap();
            assert_requirements_satisfied(&pool, &outcome);
            assert_eq!(
                outcome.install,
                vec![
                    "testa-0:1",
                    "testb-0:1-3.fc32",
                    "testb-0:2-1.fc32",
                    "testc-0:1"
                ]
            );
        }

        #[test]
        fn test_resolve_json_pool() {
            let pool: Vec<Package> = serde_json::from_str(JSON_POOL).unwrap();
            let outcome =
                resolve::<$T>(&pool, CandidateSelection::BestOnly, &["testa"]).unwrap();
            assert_eq!(outcome.install, vec!["testa-0:1", "testb-0:2-1.fc32"]);
            assert_eq!(outcome.excluded, vec!["testc-0:1"]);
            assert_requirements_satisfied(&pool, &outcome);
        }

        #[test]
        fn test_best_only_generates_only_newest() {
            let pool = vec![
                PackageBuilder::new("testa").provides(["a"]).build(),
                PackageBuilder::new("testa").version("2").provides(["a"]).build(),
            ];
            let mut resolver = Resolver::with_solver(<$T>::default(), CandidateSelection::BestOnly);
            resolver.load_involved_packages(&pool);
            assert_eq!(resolver.variable_count(), 2);

            resolver.construct_requirements(["a"]).unwrap();
            let resolution = resolver.resolve().unwrap();
            assert_eq!(resolution.install, vec![&pool[1]]);
            assert!(resolution.excluded.is_empty());
        }
    };
}

#[cfg(feature = "varisat")]
mod varisat {
    use super::*;

    resolver_backend_tests!(rpmtree_solve::varisat::Solver);
}

mod brute_force {
    use super::*;

    resolver_backend_tests!(rpmtree_solve::brute_force::Solver);
}
