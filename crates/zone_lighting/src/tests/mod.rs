//! End-to-end lighting scenarios with fake collaborators
