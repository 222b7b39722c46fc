#[cfg(test)]
mod tests {
    use fukurow_core::model::{Axiom, ClassExpression, Individual, OwlIri, PropertyExpression};
    use fukurow_dl::{Materialization, OwlDlReasoner};
    use fukurow_explain::{
        Deduplicator, ExplainConfig, ExplainError, ExplainResult, ExplanationCache, ExplanationEngine,
        ExplanationRecord, JustificationPath, ProcessingContext, QueryTarget, ReasoningType, SearchContext, SizeRange,
        Strategy, StrategyRegistry, Tagger, TaggingSummary,
    };
    use fukurow_store::MemoryStatementStore;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn iri(name: &str) -> OwlIri {
        OwlIri::new(format!("http://example.org/family#{}", name))
    }

    fn ind(name: &str) -> Individual {
        Individual(iri(name))
    }

    fn class(name: &str) -> ClassExpression {
        ClassExpression::Named(iri(name))
    }

    fn prop(name: &str) -> PropertyExpression {
        PropertyExpression::ObjectProperty(iri(name))
    }

    fn family() -> Vec<Axiom> {
        vec![
            Axiom::subclass(&iri("Man"), &iri("Person")),
            Axiom::subclass(&iri("Woman"), &iri("Person")),
            Axiom::subclass(&iri("Father"), &iri("Man")),
            Axiom::ObjectPropertyDomain(prop("hasChild"), class("Parent")),
            Axiom::ObjectPropertyRange(prop("hasChild"), class("Person")),
            Axiom::InverseProperties(prop("hasChild"), prop("hasParent")),
            Axiom::TransitiveProperty(prop("hasAncestor")),
            Axiom::class_assertion(&iri("Man"), &ind("john")),
            Axiom::class_assertion(&iri("Father"), &ind("bob")),
            Axiom::property_assertion(&iri("hasChild"), &ind("mary"), &ind("tom")),
            Axiom::property_assertion(&iri("hasAncestor"), &ind("ann"), &ind("bob")),
            Axiom::property_assertion(&iri("hasAncestor"), &ind("bob"), &ind("carl")),
        ]
    }

    fn knowledge_base(axioms: Vec<Axiom>) -> (MemoryStatementStore, Materialization) {
        let store = MemoryStatementStore::from_axioms(axioms);
        let kb = OwlDlReasoner::new().materialize(&store).unwrap();
        (store, kb)
    }

    fn signatures(paths: &[JustificationPath]) -> Vec<String> {
        paths.iter().map(Deduplicator::signature).collect()
    }

    /// Always fails; used to check that one broken strategy does not sink a request
    struct FailingStrategy;

    impl Strategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "always_failing"
        }

        fn description(&self) -> &'static str {
            "Fails on every target"
        }

        fn priority(&self) -> i32 {
            0
        }

        fn can_explain(&self, _target: &QueryTarget) -> bool {
            true
        }

        fn explain(&self, _target: &QueryTarget, _ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
            Err(ExplainError::strategy_failed(self.name(), "index unavailable"))
        }
    }

    #[test]
    fn test_minimal_subclass_scenario() -> anyhow::Result<()> {
        init_tracing();
        let store = MemoryStatementStore::from_axioms(vec![
            Axiom::subclass(&iri("Man"), &iri("Person")),
            Axiom::class_assertion(&iri("Man"), &ind("john")),
        ]);
        let kb = OwlDlReasoner::new().materialize(&store)?;
        let engine = ExplanationEngine::with_config(&store, &kb, ExplainConfig::default())?;

        let paths = engine.explain_statement(&Axiom::class_assertion(&iri("Person"), &ind("john")))?;
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].reasoning_type(), ReasoningType::Subsumption);
        assert_eq!(paths[0].complexity(), 2);
        assert_eq!(Tagger::new().tag(&paths[0]), "H");
        Ok(())
    }

    #[test]
    fn test_minimal_transitive_scenario() -> anyhow::Result<()> {
        init_tracing();
        let store = MemoryStatementStore::from_axioms(vec![
            Axiom::TransitiveProperty(prop("isAncestorOf")),
            Axiom::property_assertion(&iri("isAncestorOf"), &ind("a"), &ind("b")),
            Axiom::property_assertion(&iri("isAncestorOf"), &ind("b"), &ind("c")),
        ]);
        let kb = OwlDlReasoner::new().materialize(&store)?;
        let engine = ExplanationEngine::new(&store, &kb);

        let paths = engine.explain_statement(&Axiom::property_assertion(&iri("isAncestorOf"), &ind("a"), &ind("c")))?;
        let transitive = paths
            .iter()
            .find(|p| p.reasoning_type() == ReasoningType::TransitiveProperty)
            .ok_or_else(|| anyhow::anyhow!("no transitive path"))?;
        assert_eq!(transitive.complexity(), 3);
        assert!(Tagger::new().tag(transitive).contains('T'));
        Ok(())
    }

    #[test]
    fn test_subclass_scenario() {
        init_tracing();
        let (store, kb) = knowledge_base(family());
        let engine = ExplanationEngine::new(&store, &kb);

        let paths = engine.find_all_explanation_paths(&ind("john"), &iri("Person"));
        assert!(!paths.is_empty());
        let tagger = Tagger::new();
        assert_eq!(tagger.tag(&paths[0]), "H");
        assert!(paths[0].axioms().contains(&Axiom::subclass(&iri("Man"), &iri("Person"))));
        assert!(paths[0].axioms().contains(&Axiom::class_assertion(&iri("Man"), &ind("john"))));
    }

    #[test]
    fn test_transitive_scenario() {
        init_tracing();
        let (store, kb) = knowledge_base(family());
        let engine = ExplanationEngine::new(&store, &kb);

        let paths = engine.find_property_assertion_paths(&ind("ann"), &iri("hasAncestor"), &ind("carl"));
        let tags = Tagger::new().tag_all(&paths);
        assert!(tags.iter().any(|tag| tag == "T"), "tags: {:?}", tags);
    }

    #[test]
    fn test_domain_scenario() {
        init_tracing();
        let (store, kb) = knowledge_base(family());
        let engine = ExplanationEngine::new(&store, &kb);

        let paths = engine.find_all_explanation_paths(&ind("mary"), &iri("Parent"));
        assert!(!paths.is_empty());
        assert!(Tagger::new().tag_all(&paths).iter().all(|tag| tag.contains('R')));
    }

    #[test]
    fn test_unentailed_target_yields_nothing() {
        init_tracing();
        let (store, kb) = knowledge_base(family());
        let engine = ExplanationEngine::new(&store, &kb);

        assert!(engine.find_all_explanation_paths(&ind("john"), &iri("Woman")).is_empty());
        assert!(engine.find_all_explanation_paths(&ind("nobody"), &iri("Person")).is_empty());
    }

    #[test]
    fn test_direct_assertion_comes_first() {
        init_tracing();
        let (store, kb) = knowledge_base(family());
        let config = ExplainConfig { short_circuit_direct: false, ..ExplainConfig::default() };
        let engine = ExplanationEngine::with_config(&store, &kb, config).unwrap();

        let paths = engine.find_all_explanation_paths(&ind("bob"), &iri("Father"));
        assert!(!paths.is_empty());
        assert!(!paths[0].is_inferred());
        assert_eq!(paths[0].complexity(), 1);
        assert_eq!(Tagger::new().tag(&paths[0]), "D");
    }

    #[test]
    fn test_long_chains_are_bounded() {
        init_tracing();
        let mut axioms: Vec<Axiom> = (0..14)
            .map(|i| Axiom::subclass(&iri(&format!("C{}", i)), &iri(&format!("C{}", i + 1))))
            .collect();
        axioms.push(Axiom::class_assertion(&iri("C0"), &ind("x")));
        let (store, kb) = knowledge_base(axioms);
        let engine = ExplanationEngine::new(&store, &kb);

        let near = engine.find_all_explanation_paths(&ind("x"), &iri("C3"));
        assert!(!near.is_empty());

        let far = engine.find_all_explanation_paths(&ind("x"), &iri("C14"));
        let limit = engine.config().max_chain_length;
        assert!(far.iter().all(|p| p.complexity() <= limit));
    }

    #[test]
    fn test_failing_strategy_is_isolated() {
        init_tracing();
        let (store, kb) = knowledge_base(family());
        let baseline = ExplanationEngine::new(&store, &kb).find_all_explanation_paths(&ind("john"), &iri("Person"));

        let mut registry = StrategyRegistry::with_defaults();
        registry.register(Box::new(FailingStrategy));
        let engine = ExplanationEngine::new(&store, &kb).with_registry(registry);
        let paths = engine.find_all_explanation_paths(&ind("john"), &iri("Person"));

        assert_eq!(signatures(&paths), signatures(&baseline));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        init_tracing();
        let (store, kb) = knowledge_base(family());
        let sequential = ExplanationEngine::new(&store, &kb);
        let config = ExplainConfig { parallel: true, ..ExplainConfig::default() };
        let parallel = ExplanationEngine::with_config(&store, &kb, config).unwrap();

        let targets = [
            QueryTarget::class_membership(&ind("bob"), &iri("Person")),
            QueryTarget::class_membership(&ind("tom"), &iri("Person")),
            QueryTarget::property_assertion(&ind("tom"), &iri("hasParent"), &ind("mary")),
        ];
        for target in &targets {
            assert_eq!(signatures(&parallel.explain(target)), signatures(&sequential.explain(target)));
        }
    }

    #[test]
    fn test_cached_explanations() {
        init_tracing();
        let (store, kb) = knowledge_base(family());
        let engine = ExplanationEngine::new(&store, &kb);
        let cache = ExplanationCache::new();
        let target = QueryTarget::class_membership(&ind("john"), &iri("Person"));

        let first = engine.explain_cached(&target, &cache);
        let second = engine.explain_cached(&target, &cache);
        assert_eq!(first.paths().map(signatures), second.paths().map(signatures));
        assert_eq!(cache.len(), 1);

        let outer = cache.get_or_compute("outer", || {
            let inner = cache.get_or_compute("outer", Vec::new);
            assert!(inner.is_recursive());
            engine.explain(&target)
        });
        assert!(outer.paths().is_some_and(|paths| !paths.is_empty()));
    }

    #[test]
    fn test_export_record_and_summary() {
        init_tracing();
        let (store, kb) = knowledge_base(family());
        let engine = ExplanationEngine::new(&store, &kb);
        let tagger = Tagger::new();
        let target = QueryTarget::class_membership(&ind("bob"), &iri("Person"));

        let paths = engine.explain(&target);
        assert!(!paths.is_empty());

        let mut context = ProcessingContext::new();
        context.mark_processed(&target.key(), "family.owl");
        let record = ExplanationRecord::assemble(&target, &paths, &tagger, &context);

        let min = paths.iter().map(JustificationPath::complexity).min().unwrap();
        let max = paths.iter().map(JustificationPath::complexity).max().unwrap();
        assert_eq!(record.size, Some(SizeRange { min, max }));
        assert_eq!(record.explanation_count, paths.len());
        assert_eq!(record.explanations.len(), paths.len());

        let summary = TaggingSummary::from_paths(&paths, &tagger);
        assert_eq!(summary.total_explanations, paths.len());
        assert!(summary.has_feature('H'));
    }
}
