//! Tests for non-deterministic automata and subset simulation

#[cfg(test)]
mod tests {
    use quadfa::QuadfaError;
    use quadfa::automaton::nfa::{Label, Nfa};
    use quadfa::automaton::state::StateId;
    use quadfa::automaton::state_set::StateSet;

    // Accepts exactly the words "a" and "ab"
    fn small_nfa() -> Nfa {
        let mut nfa = Nfa::new(['a', 'b']);
        let start = nfa.add_state().expect("fresh id");
        let middle = nfa.add_state().expect("fresh id");
        let end = nfa.add_state().expect("fresh id");
        nfa.set_initial(start).expect("known state");
        nfa.add_transition(start, Label::Symbol('a'), middle)
            .expect("known states");
        nfa.add_transition(middle, Label::Symbol('b'), end)
            .expect("known states");
        nfa.add_final(middle).expect("known state");
        nfa.add_final(end).expect("known state");
        nfa
    }

    // Tests alphabet deduplication keeps first-seen order
    // Verified by sorting the alphabet
    #[test]
    fn test_alphabet_order() {
        let mut nfa = Nfa::new(['b', 'a', 'b']);
        assert_eq!(nfa.alphabet(), &['b', 'a']);
        nfa.extend_alphabet(['c', 'a']);
        assert_eq!(nfa.alphabet(), &['b', 'a', 'c']);
    }

    // Tests acceptance by subset simulation
    // Verified by ignoring the final-state check
    #[test]
    fn test_accepts_words() {
        let nfa = small_nfa();
        assert!(nfa.accepts("a".chars()).expect("initial set"));
        assert!(nfa.accepts("ab".chars()).expect("initial set"));
        assert!(!nfa.accepts("".chars()).expect("initial set"));
        assert!(!nfa.accepts("b".chars()).expect("initial set"));
        assert!(!nfa.accepts("abb".chars()).expect("initial set"));
    }

    // Tests that epsilon edges are followed transitively
    // Verified by following a single epsilon step only
    #[test]
    fn test_epsilon_closure_transitive() {
        let mut nfa = Nfa::new(['a']);
        let states: Vec<StateId> = (0..4)
            .map(|_| nfa.add_state().expect("fresh id"))
            .collect();
        for pair in states.windows(2) {
            nfa.add_transition(pair[0], Label::Epsilon, pair[1])
                .expect("known states");
        }

        let mut seed = StateSet::new(4);
        seed.insert(1);
        assert_eq!(nfa.epsilon_closure(&seed).to_vec(), vec![1, 2, 3]);

        nfa.set_initial(states[0]).expect("known state");
        nfa.add_final(states[3]).expect("known state");
        assert!(nfa.accepts("".chars()).expect("initial set"));
    }

    // Tests that epsilon cycles terminate
    // Verified by removing the visited check
    #[test]
    fn test_epsilon_cycle_terminates() {
        let mut nfa = Nfa::new(['a']);
        let left = nfa.add_state().expect("fresh id");
        let right = nfa.add_state().expect("fresh id");
        nfa.add_transition(left, Label::Epsilon, right)
            .expect("known states");
        nfa.add_transition(right, Label::Epsilon, left)
            .expect("known states");

        let mut seed = StateSet::new(2);
        seed.insert(0);
        assert_eq!(nfa.epsilon_closure(&seed).count(), 2);
    }

    // Tests rejection of symbols outside the alphabet
    // Verified by skipping the alphabet check
    #[test]
    fn test_transition_symbol_must_be_in_alphabet() {
        let mut nfa = Nfa::new(['a']);
        let only = nfa.add_state().expect("fresh id");
        let result = nfa.add_transition(only, Label::Symbol('z'), only);
        assert!(matches!(result, Err(QuadfaError::InvalidAutomaton { .. })));
        assert!(nfa.add_transition(only, Label::Epsilon, only).is_ok());
    }

    // Tests duplicate edges collapse
    // Verified by pushing every added edge
    #[test]
    fn test_duplicate_edges_collapse() {
        let mut nfa = Nfa::new(['a']);
        let from = nfa.add_state().expect("fresh id");
        let to = nfa.add_state().expect("fresh id");
        nfa.add_transition(from, Label::Symbol('a'), to)
            .expect("known states");
        nfa.add_transition(from, Label::Symbol('a'), to)
            .expect("known states");
        assert_eq!(
            nfa.successors(from, Label::Symbol('a')).expect("known"),
            vec![to]
        );
        assert_eq!(nfa.labels_of(from).expect("known"), vec![Label::Symbol('a')]);
        assert!(nfa.successors(to, Label::Epsilon).expect("known").is_empty());
    }

    // Tests preferred ids fall back to fresh ones when taken
    // Verified by always using the preferred id
    #[test]
    fn test_add_state_preferring() {
        let mut nfa = Nfa::new(['a']);
        assert_eq!(
            nfa.add_state_preferring(StateId(2)).expect("fresh id"),
            StateId(2)
        );
        assert_eq!(
            nfa.add_state_preferring(StateId(2)).expect("fresh id"),
            StateId(3)
        );
        assert_eq!(nfa.add_state().expect("fresh id"), StateId(4));
    }

    // Tests that acceptance needs an initial state
    // Verified by defaulting to the first state
    #[test]
    fn test_accepts_without_initial() {
        let mut nfa = Nfa::new(['a']);
        nfa.add_state().expect("fresh id");
        assert!(nfa.accepts("a".chars()).is_err());
    }

    // Tests equality compares final states as a set
    // Verified by comparing finals in marking order
    #[test]
    fn test_equality_final_order() {
        let build = |reverse: bool| {
            let mut nfa = Nfa::new(['a']);
            let first = nfa.add_state().expect("fresh id");
            let second = nfa.add_state().expect("fresh id");
            nfa.set_initial(first).expect("known state");
            let order = if reverse {
                [second, first]
            } else {
                [first, second]
            };
            for id in order {
                nfa.add_final(id).expect("known state");
            }
            nfa
        };
        assert_eq!(build(false), build(true));
        assert_eq!(Label::Symbol('a').to_string(), "a");
    }
}
