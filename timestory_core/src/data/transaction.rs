use crate::error::TimestoryError;

/// A transaction that can be executed on some type `V`, modifying it.
pub trait Transaction<V> {
    /// Executes the transaction on the given `V`, modifying it. If the
    /// transaction is successful, returns a function that can be used to
    /// roll back the transaction; when given a `V` in the exact state after
    /// this transaction executed, the rollback is guaranteed to
    /// modify the `V` into the exact state before this transaction executed. If
    /// the execution is unsuccessful, the `V` must remain unchanged.
    fn execute(&self, value: &mut V) -> Result<Rollback<V>, TimestoryError>;
}

pub type Rollback<V> = Box<dyn Fn(&mut V)>;

/// Executes all the given transactions on the given value and returns them in
/// the order they were executed. If one of the transactions fails, then the
/// entire process is rolled back as if nothing happened at all. The error and
/// index of the transaction that failed is returned.
pub fn execute_all_or_roll_back<V, I, T>(
    value: &mut V,
    transactions: I,
) -> Result<Vec<T>, (TimestoryError, usize)>
where
    I: IntoIterator<Item = T>,
    T: Transaction<V>,
{
    let mut rollback_stack = Vec::new();
    let mut history = Vec::new();
    for (i, transaction) in transactions.into_iter().enumerate() {
        match transaction.execute(value) {
            Ok(rollback) => {
                rollback_stack.push(rollback);
                history.push(transaction);
            }
            Err(err) => {
                for rollback in rollback_stack.into_iter().rev() {
                    rollback(value);
                }
                return Err((err, i));
            }
        };
    }
    Ok(history)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::EventId;

    /// Pushes a number, refusing duplicates.
    struct PushUnique(u32);

    impl Transaction<Vec<u32>> for PushUnique {
        fn execute(&self, value: &mut Vec<u32>) -> Result<Rollback<Vec<u32>>, TimestoryError> {
            if value.contains(&self.0) {
                return Err(TimestoryError::DuplicateEventId(EventId(self.0 as u64)));
            }
            value.push(self.0);
            Ok(Box::new(|value| {
                value.pop();
            }))
        }
    }

    #[test]
    fn executes_everything_on_success() {
        let mut value = vec![1];
        let history =
            execute_all_or_roll_back(&mut value, [PushUnique(2), PushUnique(3)]).unwrap();
        assert_eq!(value, vec![1, 2, 3]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn rolls_back_on_failure() {
        let mut value = vec![1];
        let Err((_, index)) =
            execute_all_or_roll_back(&mut value, [PushUnique(2), PushUnique(3), PushUnique(1)])
        else {
            unreachable!();
        };
        assert_eq!(index, 2);
        assert_eq!(value, vec![1]);
    }
}
