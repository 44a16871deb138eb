mod greedy_planner_tests;
